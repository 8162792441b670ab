//! Typed records for every server-driven UI component.
//!
//! The set of variants is closed: the server may only send the kinds
//! listed in [`ComponentKind`]. Display values (prices, balances, dates,
//! colors, URLs) are kept as the opaque strings the server sent.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Wire key carrying the variant discriminator on every top-level element.
pub const DISCRIMINATOR_KEY: &str = "_type";

/// Wire key carrying the data-level `type` tag on every variant.
pub const TYPE_TAG_KEY: &str = "type";

/// The closed set of component kinds, one per wire discriminator value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentKind {
    Banner,
    Card,
    Button,
    Product,
    Transaction,
    Dashboard,
    Chart,
    Profile,
    Settings,
}

impl ComponentKind {
    /// Every kind, in declaration order.
    pub const ALL: [ComponentKind; 9] = [
        ComponentKind::Banner,
        ComponentKind::Card,
        ComponentKind::Button,
        ComponentKind::Product,
        ComponentKind::Transaction,
        ComponentKind::Dashboard,
        ComponentKind::Chart,
        ComponentKind::Profile,
        ComponentKind::Settings,
    ];

    /// Look up a kind by its wire discriminator value.
    ///
    /// Matching is exact and case-sensitive.
    pub fn from_tag(tag: &str) -> Option<ComponentKind> {
        match tag {
            "banner" => Some(ComponentKind::Banner),
            "card" => Some(ComponentKind::Card),
            "button" => Some(ComponentKind::Button),
            "product" => Some(ComponentKind::Product),
            "transaction" => Some(ComponentKind::Transaction),
            "dashboard" => Some(ComponentKind::Dashboard),
            "chart" => Some(ComponentKind::Chart),
            "profile" => Some(ComponentKind::Profile),
            "settings" => Some(ComponentKind::Settings),
            _ => None,
        }
    }

    /// The wire discriminator value for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ComponentKind::Banner => "banner",
            ComponentKind::Card => "card",
            ComponentKind::Button => "button",
            ComponentKind::Product => "product",
            ComponentKind::Transaction => "transaction",
            ComponentKind::Dashboard => "dashboard",
            ComponentKind::Chart => "chart",
            ComponentKind::Profile => "profile",
            ComponentKind::Settings => "settings",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A single decoded UI component, dispatched by kind.
///
/// Serializes as an internally tagged object carrying both the `_type`
/// discriminator and the payload's own `type` field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "_type", rename_all = "lowercase")]
pub enum Component {
    Banner(BannerComponent),
    Card(CardComponent),
    Button(ButtonComponent),
    Product(ProductComponent),
    Transaction(Transaction),
    Dashboard(DashboardComponent),
    Chart(ChartComponent),
    Profile(ProfileComponent),
    Settings(SettingsComponent),
}

impl Component {
    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Banner(_) => ComponentKind::Banner,
            Component::Card(_) => ComponentKind::Card,
            Component::Button(_) => ComponentKind::Button,
            Component::Product(_) => ComponentKind::Product,
            Component::Transaction(_) => ComponentKind::Transaction,
            Component::Dashboard(_) => ComponentKind::Dashboard,
            Component::Chart(_) => ComponentKind::Chart,
            Component::Profile(_) => ComponentKind::Profile,
            Component::Settings(_) => ComponentKind::Settings,
        }
    }

    /// The data-level `type` string carried by the payload.
    pub fn type_tag(&self) -> &str {
        match self {
            Component::Banner(c) => &c.type_tag,
            Component::Card(c) => &c.type_tag,
            Component::Button(c) => &c.type_tag,
            Component::Product(c) => &c.type_tag,
            Component::Transaction(c) => &c.type_tag,
            Component::Dashboard(c) => &c.type_tag,
            Component::Chart(c) => &c.type_tag,
            Component::Profile(c) => &c.type_tag,
            Component::Settings(c) => &c.type_tag,
        }
    }
}

// ── Banner ──────────────────────────────────────────────────────────

/// A promotional banner with a countdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerComponent {
    #[serde(rename = "type")]
    pub type_tag: String,
    pub title: String,
    pub description: String,
    /// ISO-8601 timestamp, kept verbatim.
    pub countdown: String,
    /// Hex color string, kept verbatim.
    pub background_color: String,
}

// ── Card ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardComponent {
    #[serde(rename = "type")]
    pub type_tag: String,
    pub title: String,
    pub image_url: String,
    pub description: String,
}

// ── Button ──────────────────────────────────────────────────────────

/// A call-to-action button. `action` is a URL or an action identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ButtonComponent {
    #[serde(rename = "type")]
    pub type_tag: String,
    pub text: String,
    pub action: String,
}

// ── Product ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductComponent {
    #[serde(rename = "type")]
    pub type_tag: String,
    pub title: String,
    pub image_url: String,
    pub description: String,
    /// Pre-formatted currency text.
    pub price: String,
}

// ── Transaction ─────────────────────────────────────────────────────

/// A single transaction line.
///
/// Appears both as a top-level component and nested inside a dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    #[serde(rename = "type")]
    pub type_tag: String,
    pub title: String,
    /// Pre-formatted currency text.
    pub amount: String,
    /// ISO-8601 timestamp, kept verbatim.
    pub date: String,
}

// ── Dashboard ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardComponent {
    #[serde(rename = "type")]
    pub type_tag: String,
    pub balance: String,
    pub transactions: Vec<Transaction>,
}

// ── Chart ───────────────────────────────────────────────────────────

/// A bar chart. `labels` runs parallel to `data`; lengths are not checked.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartComponent {
    #[serde(rename = "type")]
    pub type_tag: String,
    pub title: String,
    pub data: Vec<f64>,
    pub labels: Vec<String>,
}

// ── Profile ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileComponent {
    #[serde(rename = "type")]
    pub type_tag: String,
    pub name: String,
    /// Avatar image URL.
    pub avatar: String,
    pub bio: String,
    pub stats: BTreeMap<String, i64>,
}

// ── Settings ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsComponent {
    #[serde(rename = "type")]
    pub type_tag: String,
    pub sections: Vec<Section>,
}

/// A titled group of settings items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub title: String,
    pub items: Vec<Item>,
}

/// A single settings row.
///
/// `item_type` is one of "toggle", "action" or "input" by convention but
/// is not constrained at decode time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Item {
    /// Whether a toggle item is switched on (`value == "true"`).
    pub fn is_enabled(&self) -> bool {
        self.value.as_deref() == Some("true")
    }
}
