//! Plain-text tables for terminal output. `--json` bypasses this module.

use std::fmt::Write;

use chrono::{DateTime, Utc};
use dindin_core::{relative_day_label, Category, PaymentMethod};

/// One row per category, newest edit shown as a relative day.
pub fn categories_table(items: &[Category], now: DateTime<Utc>) -> String {
    if items.is_empty() {
        return "No categories yet.\n".to_string();
    }

    let mut out = format!(
        "{:<24} {:<8} {:<8} {:<14} {:<12} {}\n",
        "NAME", "TYPE", "COLOR", "ICON", "UPDATED", "ID"
    );
    for c in items {
        let _ = writeln!(
            out,
            "{:<24} {:<8} {:<8} {:<14} {:<12} {}",
            c.name,
            c.category_type,
            c.color,
            c.icon,
            relative_day_label(c.updated_at, now),
            c.id
        );
    }
    out
}

pub fn payment_methods_table(items: &[PaymentMethod]) -> String {
    if items.is_empty() {
        return "No payment methods.\n".to_string();
    }

    let mut out = format!("{:<20} {:<12} {:<9} {}\n", "NAME", "ICON", "STATUS", "ID");
    for m in items {
        let _ = writeln!(
            out,
            "{:<20} {:<12} {:<9} {}",
            m.name,
            m.icon,
            if m.enabled { "enabled" } else { "disabled" },
            m.id
        );
    }
    out
}

/// `Lazer (gasto, purple, Gamepad2) 1b9d...`
pub fn category_line(c: &Category) -> String {
    format!(
        "{} ({}, {}, {}) {}",
        c.name, c.category_type, c.color, c.icon, c.id
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use dindin_core::{CategoryColor, CategoryType, IconName};

    fn category(name: &str, updated_at: DateTime<Utc>) -> Category {
        Category {
            id: format!("id-{}", name),
            name: name.to_string(),
            icon: IconName::Gamepad2,
            color: CategoryColor::Purple,
            category_type: CategoryType::Expense,
            created_at: updated_at,
            updated_at,
        }
    }

    #[test]
    fn test_empty_tables() {
        let now = Utc::now();
        assert_eq!(categories_table(&[], now), "No categories yet.\n");
        assert_eq!(payment_methods_table(&[]), "No payment methods.\n");
    }

    #[test]
    fn test_category_rows_show_stored_names_and_relative_day() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        let table = categories_table(
            &[
                category("Lazer", now),
                category("Casa", now - Duration::days(1)),
                category("Saúde", now - Duration::days(30)),
            ],
            now,
        );

        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("NAME"));
        assert!(lines[1].contains("gasto"));
        assert!(lines[1].contains("purple"));
        assert!(lines[1].contains("Gamepad2"));
        assert!(lines[1].contains("hoje"));
        assert!(lines[2].contains("ontem"));
        assert!(lines[3].contains("14/02"));
        assert!(lines[3].ends_with("id-Saúde"));
    }

    #[test]
    fn test_payment_method_status_column() {
        let now = Utc::now();
        let methods = vec![
            PaymentMethod {
                id: "a".into(),
                name: "Boleto".into(),
                icon: IconName::FileText,
                enabled: false,
                created_at: now,
                updated_at: now,
            },
            PaymentMethod {
                id: "b".into(),
                name: "Pix".into(),
                icon: IconName::Pix,
                enabled: true,
                created_at: now,
                updated_at: now,
            },
        ];

        let table = payment_methods_table(&methods);
        assert!(table.lines().nth(1).unwrap().contains("disabled"));
        assert!(table.lines().nth(2).unwrap().contains("enabled"));
    }

    #[test]
    fn test_category_line() {
        let now = Utc::now();
        assert_eq!(
            category_line(&category("Lazer", now)),
            "Lazer (gasto, purple, Gamepad2) id-Lazer"
        );
    }
}
