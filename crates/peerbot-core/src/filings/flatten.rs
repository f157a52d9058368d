use crate::profile::{FsFlat, FsSummary, FsTable, FsType};
use crate::types::Money;

/// Flatten extracted statement tables into headline figures.
///
/// The first consolidated table wins; otherwise the first table. Within a
/// table the first occurrence of each line item is kept.
pub fn flatten_fs_summary(summary: &FsSummary) -> FsFlat {
    let Some(table) = summary
        .tables
        .iter()
        .find(|t| t.fs_type == FsType::Consolidated)
        .or_else(|| summary.tables.first())
    else {
        return FsFlat::default();
    };
    flatten_table(table)
}

fn flatten_table(table: &FsTable) -> FsFlat {
    let mut flat = FsFlat {
        fs_type: Some(table.fs_type),
        ..FsFlat::default()
    };
    for item in &table.items {
        let slot = match normalize_item_name(&item.item_name).as_str() {
            "매출액" | "수익(매출액)" | "영업수익" | "매출" => &mut flat.revenue,
            "영업이익" | "영업이익(손실)" => &mut flat.operating_income,
            "당기순이익" | "당기순이익(손실)" => &mut flat.net_income,
            "자산총계" => &mut flat.total_assets,
            "부채총계" => &mut flat.total_liabilities,
            "자본총계" => &mut flat.total_equity,
            "영업활동현금흐름" | "영업활동으로인한현금흐름" => &mut flat.operating_cf,
            _ => continue,
        };
        set_once(slot, item.amount);
    }
    flat
}

fn set_once(slot: &mut Option<Money>, value: Money) {
    if slot.is_none() {
        *slot = Some(value);
    }
}

/// Strip whitespace and roman-numeral / ordinal prefixes such as "Ⅰ." or "1.".
fn normalize_item_name(name: &str) -> String {
    let compact: String = name.chars().filter(|c| !c.is_whitespace()).collect();
    let trimmed = compact.trim_start_matches(|c: char| {
        c.is_ascii_digit() || ('Ⅰ'..='Ⅻ').contains(&c) || c == '.'
    });
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::FsItem;
    use rust_decimal_macros::dec;

    fn item(name: &str, amount: Money) -> FsItem {
        FsItem {
            item_name: name.into(),
            raw_value: amount,
            amount,
            source_row: String::new(),
        }
    }

    fn table(idx: u32, fs_type: FsType, items: Vec<FsItem>) -> FsTable {
        FsTable {
            table_index: idx,
            fs_type,
            unit_str: "원".into(),
            unit_multiplier: dec!(1),
            items,
        }
    }

    #[test]
    fn test_prefers_consolidated_table() {
        let summary = FsSummary {
            corp_code: "x".into(),
            bsns_year: 2024,
            tables: vec![
                table(0, FsType::Separate, vec![item("매출액", dec!(1))]),
                table(1, FsType::Consolidated, vec![item("매출액", dec!(2))]),
            ],
        };
        let flat = flatten_fs_summary(&summary);
        assert_eq!(flat.revenue, Some(dec!(2)));
        assert_eq!(flat.fs_type, Some(FsType::Consolidated));
    }

    #[test]
    fn test_item_name_variants() {
        let summary = FsSummary {
            corp_code: "x".into(),
            bsns_year: 2024,
            tables: vec![table(
                0,
                FsType::Unknown,
                vec![
                    item("Ⅰ. 수익(매출액)", dec!(10)),
                    item("영업이익(손실)", dec!(3)),
                    item("당기 순이익", dec!(2)),
                    item("자산 총계", dec!(40)),
                    item("부채총계", dec!(15)),
                    item("자본총계", dec!(25)),
                    item("영업활동현금흐름", dec!(4)),
                    item("매출액", dec!(999)),
                ],
            )],
        };
        let flat = flatten_fs_summary(&summary);
        assert_eq!(flat.revenue, Some(dec!(10)));
        assert_eq!(flat.operating_income, Some(dec!(3)));
        assert_eq!(flat.net_income, Some(dec!(2)));
        assert_eq!(flat.total_assets, Some(dec!(40)));
        assert_eq!(flat.total_liabilities, Some(dec!(15)));
        assert_eq!(flat.total_equity, Some(dec!(25)));
        assert_eq!(flat.operating_cf, Some(dec!(4)));
    }

    #[test]
    fn test_empty_summary() {
        let summary = FsSummary {
            corp_code: "x".into(),
            bsns_year: 2024,
            tables: vec![],
        };
        assert_eq!(flatten_fs_summary(&summary), FsFlat::default());
    }
}
