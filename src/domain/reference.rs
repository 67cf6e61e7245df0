//! Master-data reference records
//!
//! One record type per master dataset. Records are produced either by a
//! whole-dataset RAAS report (folded into a read-only dictionary once per
//! batch) or by an on-demand single-record lookup that is cached for the
//! rest of the batch.

use serde::{Deserialize, Serialize};

/// General-ledger account master record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerAccount {
    pub ledger_account_id: Option<String>,
    pub ledger_account_name: Option<String>,
    pub types: Option<String>,
    pub account_sets: Vec<String>,
}

/// Manager attached to a cost center
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manager {
    pub manager_employee_id: Option<String>,
    pub manager_name: Option<String>,
}

/// Cost center master record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostCenterInfo {
    pub reference_id: Option<String>,
    pub name: Option<String>,
    pub code: Option<String>,
    pub is_active: Option<bool>,
    pub manager: Option<Manager>,
}

/// Company aka subsidiary master record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubsidiaryInfo {
    pub internal_id: Option<String>,
    pub name: Option<String>,
}

/// Book code master record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookCodeInfo {
    pub book_code_id: Option<String>,
    pub name: Option<String>,
}

/// GTM organization (geo sales) dimension record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoSales {
    pub dimension_id: Option<String>,
    pub name: Option<String>,
    pub organization_active: Option<bool>,
    pub dimension_name: Option<String>,
}

/// Expense type, keyed by spend category id
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpendCategory {
    pub code: Option<String>,
    pub name: Option<String>,
}

/// Customer contract aka deal record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DealInfo {
    pub customer_contract_id: Option<String>,
    pub contract_name: Option<String>,
    pub po_number: Option<String>,
    pub on_hold: Option<bool>,
    pub contract_type: Option<String>,
}

/// Supplier aka vendor record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VendorInfo {
    pub vendor_code: Option<String>,
    pub vendor_ref_id: Option<String>,
    pub company_name: Option<String>,

    pub worktag_only: Option<bool>,
    pub submit: Option<bool>,
    pub disable_change_order: Option<bool>,
    pub acknowledgement_expected: Option<bool>,

    pub approval_status: Option<String>,
    pub supplier_category: Option<String>,
    pub supplier_group_category: Option<String>,
    pub payment_terms_reference: Option<String>,
    pub default_payment_type_reference: Option<String>,

    pub irs_1099_supplier: Option<bool>,
    pub invoice_any_supplier: Option<i64>,
    pub supplier_minimum_order_amount: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spend_category_hashable() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(SpendCategory {
            code: Some("SC1".to_string()),
            name: Some("Travel".to_string()),
        });
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_defaults_are_empty() {
        let account = LedgerAccount::default();
        assert!(account.ledger_account_id.is_none());
        assert!(account.account_sets.is_empty());
    }
}
