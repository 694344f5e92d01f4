//! # Domain Types
//!
//! Core domain types used throughout Dindin.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Category     │   │  PaymentMethod  │   │  CategoryType   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  Expense gasto  │       │
//! │  │  name           │   │  name           │   │  Income receita │       │
//! │  │  icon ──────────┼───┼─► IconName      │   └─────────────────┘       │
//! │  │  color ─► CategoryColor (16 entries)  │                              │
//! │  │  category_type  │   │  enabled        │                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Icon and color are closed sets: an unknown value is rejected when it is
//! parsed, never discovered later at render time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::CoreError;

// =============================================================================
// Category Color
// =============================================================================

/// Fixed palette a category can be painted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum CategoryColor {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Pink,
    Indigo,
    Teal,
    Orange,
    Gray,
    Emerald,
    Cyan,
    Amber,
    Lime,
    Violet,
    Rose,
}

impl CategoryColor {
    /// Every palette entry, warm colors first, in picker order.
    pub const ALL: [CategoryColor; 16] = [
        CategoryColor::Red,
        CategoryColor::Rose,
        CategoryColor::Pink,
        CategoryColor::Orange,
        CategoryColor::Amber,
        CategoryColor::Yellow,
        CategoryColor::Lime,
        CategoryColor::Green,
        CategoryColor::Emerald,
        CategoryColor::Teal,
        CategoryColor::Cyan,
        CategoryColor::Blue,
        CategoryColor::Indigo,
        CategoryColor::Violet,
        CategoryColor::Purple,
        CategoryColor::Gray,
    ];

    /// Stored/serialized name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            CategoryColor::Red => "red",
            CategoryColor::Blue => "blue",
            CategoryColor::Green => "green",
            CategoryColor::Yellow => "yellow",
            CategoryColor::Purple => "purple",
            CategoryColor::Pink => "pink",
            CategoryColor::Indigo => "indigo",
            CategoryColor::Teal => "teal",
            CategoryColor::Orange => "orange",
            CategoryColor::Gray => "gray",
            CategoryColor::Emerald => "emerald",
            CategoryColor::Cyan => "cyan",
            CategoryColor::Amber => "amber",
            CategoryColor::Lime => "lime",
            CategoryColor::Violet => "violet",
            CategoryColor::Rose => "rose",
        }
    }

    /// Hex code used to render the color.
    pub const fn hex(&self) -> &'static str {
        match self {
            CategoryColor::Red => "#EF4444",
            CategoryColor::Blue => "#3B82F6",
            CategoryColor::Green => "#10B981",
            CategoryColor::Yellow => "#F59E0B",
            CategoryColor::Purple => "#8B5CF6",
            CategoryColor::Pink => "#EC4899",
            CategoryColor::Indigo => "#6366F1",
            CategoryColor::Teal => "#14B8A6",
            CategoryColor::Orange => "#F97316",
            CategoryColor::Gray => "#6B7280",
            CategoryColor::Emerald => "#059669",
            CategoryColor::Cyan => "#06B6D4",
            CategoryColor::Amber => "#D97706",
            CategoryColor::Lime => "#65A30D",
            CategoryColor::Violet => "#7C3AED",
            CategoryColor::Rose => "#F43F5E",
        }
    }
}

impl fmt::Display for CategoryColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for CategoryColor {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        CategoryColor::ALL
            .into_iter()
            .find(|color| color.as_str() == wanted)
            .ok_or_else(|| CoreError::UnknownColor(s.to_string()))
    }
}

// =============================================================================
// Icon Name
// =============================================================================

/// Declares the icon enumeration together with its name table.
///
/// Variant names double as the stored and serialized form ("Gamepad2").
macro_rules! icon_names {
    ($($variant:ident),+ $(,)?) => {
        /// Icon identifiers a category or payment method can display.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
        #[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
        #[ts(export)]
        pub enum IconName {
            $($variant),+
        }

        impl IconName {
            /// Every icon, in picker order.
            pub const ALL: &'static [IconName] = &[$(IconName::$variant),+];

            /// Stored/serialized name.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(IconName::$variant => stringify!($variant)),+
                }
            }
        }
    };
}

icon_names! {
    ShoppingCart,
    Car,
    House,
    Utensils,
    Heart,
    Gamepad2,
    GraduationCap,
    Briefcase,
    Plane,
    Coffee,
    Gift,
    Music,
    Camera,
    Book,
    Dumbbell,
    Shirt,
    Fuel,
    Smartphone,
    PiggyBank,
    Calculator,
    Stethoscope,
    Wrench,
    Palette,
    TreePine,
    Bus,
    Brain,
    Bike,
    Building2,
    Building,
    Store,
    Pizza,
    Cake,
    Wine,
    Salad,
    Apple,
    Sandwich,
    Monitor,
    Headphones,
    Keyboard,
    Mouse,
    Tablet,
    Watch,
    CircleDot,
    Trophy,
    Target,
    Zap,
    Star,
    Crown,
    Flower,
    Sun,
    Moon,
    Cloud,
    Umbrella,
    Rainbow,
    Dog,
    Cat,
    Fish,
    Bird,
    Bug,
    Leaf,
    Hammer,
    Scissors,
    Paintbrush,
    Ruler,
    Paperclip,
    Pin,
    MapPin,
    Compass,
    Globe,
    Mountain,
    Waves,
    Tent,
    Bed,
    Sofa,
    Lamp,
    Key,
    Lock,
    Shield,
    Users,
    User,
    Baby,
    Glasses,
    HardHat,
    ShoppingBag,
    Wallet,
    CreditCard,
    Receipt,
    Coins,
    Pix,
    Banknote,
    FileText,
}

impl Default for IconName {
    fn default() -> Self {
        IconName::ShoppingCart
    }
}

impl fmt::Display for IconName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for IconName {
    type Err = CoreError;

    /// Icon names are case-sensitive, matching how they are stored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        IconName::ALL
            .iter()
            .copied()
            .find(|icon| icon.as_str() == wanted)
            .ok_or_else(|| CoreError::UnknownIcon(s.to_string()))
    }
}

// =============================================================================
// Category Type
// =============================================================================

/// Whether a category classifies money going out or coming in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[ts(export)]
pub enum CategoryType {
    /// Money spent.
    #[serde(rename = "gasto")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "gasto"))]
    Expense,
    /// Money received.
    #[serde(rename = "receita")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "receita"))]
    Income,
}

impl CategoryType {
    /// Stored/serialized name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            CategoryType::Expense => "gasto",
            CategoryType::Income => "receita",
        }
    }
}

impl Default for CategoryType {
    fn default() -> Self {
        CategoryType::Expense
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for CategoryType {
    type Err = CoreError;

    /// Accepts the stored Portuguese names and their English equivalents.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gasto" | "expense" => Ok(CategoryType::Expense),
            "receita" | "income" => Ok(CategoryType::Income),
            _ => Err(CoreError::UnknownCategoryType(s.to_string())),
        }
    }
}

// =============================================================================
// Category
// =============================================================================

/// A user-defined label for classifying transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique identifier (UUID v4). Never changes.
    pub id: String,

    /// Display name.
    pub name: String,

    pub icon: IconName,

    pub color: CategoryColor,

    /// Expense or income.
    #[serde(rename = "type")]
    pub category_type: CategoryType,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Applies the fields present in `input`, leaving the others untouched.
    ///
    /// Timestamps are the caller's business: the gateway owns the clock.
    pub fn apply(&mut self, input: &UpdateCategoryInput) {
        if let Some(name) = &input.name {
            self.name = name.trim().to_string();
        }
        if let Some(icon) = input.icon {
            self.icon = icon;
        }
        if let Some(color) = input.color {
            self.color = color;
        }
        if let Some(category_type) = input.category_type {
            self.category_type = category_type;
        }
    }
}

/// Fields required to create a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryInput {
    pub name: String,
    pub icon: IconName,
    pub color: CategoryColor,
    #[serde(rename = "type")]
    pub category_type: CategoryType,
}

impl CreateCategoryInput {
    pub fn new(
        name: impl Into<String>,
        icon: IconName,
        color: CategoryColor,
        category_type: CategoryType,
    ) -> Self {
        CreateCategoryInput {
            name: name.into(),
            icon,
            color,
            category_type,
        }
    }
}

/// Partial update of a category: `None` means "leave as is".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryInput {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub icon: Option<IconName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub color: Option<CategoryColor>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub category_type: Option<CategoryType>,
}

impl UpdateCategoryInput {
    /// Starts an update that changes nothing.
    pub fn new(id: impl Into<String>) -> Self {
        UpdateCategoryInput {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn icon(mut self, icon: IconName) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn color(mut self, color: CategoryColor) -> Self {
        self.color = Some(color);
        self
    }

    pub fn category_type(mut self, category_type: CategoryType) -> Self {
        self.category_type = Some(category_type);
        self
    }

    /// True when no mutable field is present.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.icon.is_none()
            && self.color.is_none()
            && self.category_type.is_none()
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// A seeded means of payment (cash, card, ...). Only `enabled` is mutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    pub id: String,
    pub name: String,
    pub icon: IconName,
    pub enabled: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// Toggle for a payment method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaymentMethodInput {
    pub id: String,
    pub enabled: bool,
}

impl UpdatePaymentMethodInput {
    pub fn new(id: impl Into<String>, enabled: bool) -> Self {
        UpdatePaymentMethodInput {
            id: id.into(),
            enabled,
        }
    }
}

// =============================================================================
// Name Ordering
// =============================================================================

/// Orders records by name, then id.
///
/// Byte-wise comparison, the same ordering SQLite's default BINARY
/// collation produces for `ORDER BY name`.
pub trait Named {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
}

impl Named for Category {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for PaymentMethod {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Sorts in place by name ascending.
pub fn sort_by_name<T: Named>(items: &mut [T]) {
    items.sort_by(|a, b| a.name().cmp(b.name()).then_with(|| a.id().cmp(b.id())));
}

/// True if `items` is already in [`sort_by_name`] order.
pub fn is_sorted_by_name<T: Named>(items: &[T]) -> bool {
    items
        .windows(2)
        .all(|pair| (pair[0].name(), pair[0].id()) <= (pair[1].name(), pair[1].id()))
}

// =============================================================================
// Unit Tests
// =============================================================================
