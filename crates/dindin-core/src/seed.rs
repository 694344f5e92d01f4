//! # Seed Tables
//!
//! Built-in rows inserted on first run. The gateway owns *when* they are
//! inserted (only into an empty table); this module only owns *what*.

use crate::types::{CategoryColor, CategoryType, CreateCategoryInput, IconName};

/// A payment method row before it gets an id and timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentMethodSeed {
    pub name: &'static str,
    pub icon: IconName,
}

/// Payment methods every installation starts with, all enabled.
pub const DEFAULT_PAYMENT_METHODS: [PaymentMethodSeed; 5] = [
    PaymentMethodSeed {
        name: "Pix",
        icon: IconName::Pix,
    },
    PaymentMethodSeed {
        name: "Cartão de Crédito",
        icon: IconName::CreditCard,
    },
    PaymentMethodSeed {
        name: "Cartão de Débito",
        icon: IconName::CreditCard,
    },
    PaymentMethodSeed {
        name: "Dinheiro",
        icon: IconName::Banknote,
    },
    PaymentMethodSeed {
        name: "Boleto",
        icon: IconName::FileText,
    },
];

/// Sample categories offered to a brand new user.
pub fn sample_categories() -> Vec<CreateCategoryInput> {
    [
        ("Alimentação", IconName::Utensils, CategoryColor::Red),
        ("Transporte", IconName::Car, CategoryColor::Blue),
        ("Casa", IconName::House, CategoryColor::Green),
        ("Saúde", IconName::Heart, CategoryColor::Pink),
        ("Lazer", IconName::Gamepad2, CategoryColor::Purple),
    ]
    .into_iter()
    .map(|(name, icon, color)| CreateCategoryInput::new(name, icon, color, CategoryType::Expense))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_create_category;

    #[test]
    fn test_sample_categories_are_valid_expenses() {
        let samples = sample_categories();
        assert_eq!(samples.len(), 5);
        for sample in &samples {
            assert!(validate_create_category(sample).is_ok());
            assert_eq!(sample.category_type, CategoryType::Expense);
        }
    }

    #[test]
    fn test_payment_method_names_are_unique() {
        let mut names: Vec<_> = DEFAULT_PAYMENT_METHODS.iter().map(|p| p.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), DEFAULT_PAYMENT_METHODS.len());
    }
}
