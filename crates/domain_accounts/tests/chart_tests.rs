//! Tests for loading charts of accounts and querying them

use domain_accounts::{AccountError, AccountKind, AccountTree, ChartOfAccounts, DottedPath, RowStyle};

const EXPENSE_CHART: &str = r#"[
    {"id": "1", "name": "Despesas Correntes", "type": "Sintética", "group": "Pessoal", "subgroup": ""},
    {"id": "1.1", "name": "Pessoal e Encargos", "type": "Sintética", "group": "Pessoal", "subgroup": ""},
    {"id": "1.1.1", "name": "Remuneração", "type": "Sintética", "group": "Pessoal", "subgroup": "Remuneração"},
    {"id": "1.1.1.1", "name": "Salários", "type": "Analítica", "group": "Pessoal", "subgroup": "Remuneração"},
    {"id": "1.1.1.2", "name": "Férias", "type": "Analítica", "group": "Pessoal", "subgroup": "Remuneração"},
    {"id": "1.1.2", "name": "Encargos", "type": "Sintética", "group": "Pessoal", "subgroup": "Encargos"},
    {"id": "1.1.2.1", "name": "ENCARGOS", "type": "Analítica", "group": "Pessoal", "subgroup": "Encargos"},
    {"id": "1.5", "name": "Conselheiros", "type": "SYNTHETIC", "group": "Conselho", "subgroup": ""},
    {"id": "1.5.1", "name": "Jetons e Diárias", "type": "SYNTHETIC", "group": "Conselho", "subgroup": ""},
    {"id": "1.5.1.1", "name": "Jetons", "type": "ANALYTICAL", "group": "Conselho", "subgroup": ""},
    {"id": "2", "name": "Despesas de Capital", "type": "Sintética", "group": "Investimentos", "subgroup": ""},
    {"id": "2.1", "name": "Equipamentos", "type": "Analítica", "group": "Investimentos", "subgroup": ""}
]"#;

const REVENUE_CHART: &str = r#"[
    {"id": "1", "name": "Receitas Correntes", "type": "Sintética", "group": "Receitas", "subgroup": ""},
    {"id": "1.1", "name": "Anuidades", "type": "Analítica", "group": "Receitas", "subgroup": ""}
]"#;

fn p(s: &str) -> DottedPath {
    s.parse().unwrap()
}

mod loading {
    use super::*;

    #[test]
    fn test_loads_both_charts() {
        let chart = ChartOfAccounts::from_json(REVENUE_CHART, EXPENSE_CHART).unwrap();
        assert_eq!(chart.revenue.len(), 2);
        assert_eq!(chart.expense.len(), 12);
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = AccountTree::from_json("[{\"id\": 1}]").unwrap_err();
        assert!(matches!(err, AccountError::InvalidChart(_)));
    }

    #[test]
    fn test_rejects_unknown_kind() {
        let json = r#"[{"id": "1", "name": "X", "type": "Folha", "group": "", "subgroup": ""}]"#;
        assert!(AccountTree::from_json(json).is_err());
    }
}

mod queries {
    use super::*;

    #[test]
    fn test_groups_in_chart_order() {
        let tree = AccountTree::from_json(EXPENSE_CHART).unwrap();
        assert_eq!(tree.groups(), vec!["Pessoal", "Conselho", "Investimentos"]);
        assert_eq!(tree.accounts_in_group("Conselho").count(), 3);
    }

    #[test]
    fn test_top_level_synthetics() {
        let tree = AccountTree::from_json(EXPENSE_CHART).unwrap();
        let roots: Vec<String> = tree.top_level_synthetics().map(|a| a.id.to_string()).collect();
        assert_eq!(roots, vec!["1", "2"]);
    }

    #[test]
    fn test_synthetics_at_depth_two() {
        let tree = AccountTree::from_json(EXPENSE_CHART).unwrap();
        let level2: Vec<String> = tree.synthetics_at_depth(2).iter().map(|a| a.id.to_string()).collect();
        assert_eq!(level2, vec!["1.1", "1.5"]);
    }

    #[test]
    fn test_require_unknown_account() {
        let tree = AccountTree::from_json(EXPENSE_CHART).unwrap();
        assert_eq!(tree.require(&p("9.9")).unwrap_err(), AccountError::NotFound("9.9".to_string()));
        assert_eq!(tree.require(&p("2.1")).unwrap().kind, AccountKind::Analytical);
    }
}

mod collapse {
    use super::*;

    #[test]
    fn test_case_insensitive_single_child_is_collapsed() {
        let tree = AccountTree::from_json(EXPENSE_CHART).unwrap();
        assert!(tree.is_collapsed_synthetic(&p("1.1.2")));
    }

    #[test]
    fn test_different_name_single_child_is_not_collapsed() {
        let tree = AccountTree::from_json(EXPENSE_CHART).unwrap();
        assert!(!tree.is_collapsed_synthetic(&p("1.5.1")));
    }

    #[test]
    fn test_visible_rows_skip_hidden_and_promote_child() {
        let tree = AccountTree::from_json(EXPENSE_CHART).unwrap();
        let view = tree.collapse_view();
        let rows: Vec<(String, RowStyle)> = view
            .visible_rows(tree.accounts_in_group("Pessoal"))
            .map(|(a, style)| (a.id.to_string(), style))
            .collect();

        assert!(!rows.iter().any(|(id, _)| id == "1.1.2"));
        assert!(rows.contains(&("1.1.2.1".to_string(), RowStyle::PseudoSynthetic)));
        assert!(rows.contains(&("1.1.1.1".to_string(), RowStyle::Analytical)));
        assert!(rows.contains(&("1.1".to_string(), RowStyle::Synthetic)));
    }

    #[test]
    fn test_collapse_view_is_memoized() {
        let tree = AccountTree::from_json(EXPENSE_CHART).unwrap();
        let first = tree.collapse_view() as *const _;
        let second = tree.collapse_view() as *const _;
        assert_eq!(first, second);
    }
}
