//! Decoding of server payloads into typed components.
//!
//! The main entry point is [`decode`], which takes the raw payload text
//! and produces the ordered component list. Decoding is all-or-nothing:
//! one bad element fails the whole batch. [`decode_lenient`] is the
//! explicit opt-in for skipping bad elements instead, and
//! [`decode_component`] handles a single tagged object.

use crate::types::*;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Errors during component payload decoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The payload is not valid JSON, its top-level value is not an array,
    /// or an array element is not an object.
    #[error("malformed JSON: {reason}")]
    MalformedJson { reason: String },

    /// An element's `_type` is absent or names no known component.
    #[error("element {index}: {}", describe_discriminator(.found))]
    UnknownDiscriminator {
        index: usize,
        /// The discriminator as found on the wire, if present.
        found: Option<String>,
    },

    /// A matched component is missing a required field or has a field
    /// of the wrong JSON type.
    #[error("element {index} ({kind}): field '{path}' {message}")]
    SchemaViolation {
        index: usize,
        kind: ComponentKind,
        /// Field path within the element, e.g. `sections[0].items[1].title`.
        path: String,
        message: String,
    },
}

impl DecodeError {
    /// Stable snake_case name of the error class, for machine output.
    pub fn category(&self) -> &'static str {
        match self {
            DecodeError::MalformedJson { .. } => "malformed_json",
            DecodeError::UnknownDiscriminator { .. } => "unknown_discriminator",
            DecodeError::SchemaViolation { .. } => "schema_violation",
        }
    }
}

fn describe_discriminator(found: &Option<String>) -> String {
    match found {
        Some(tag) => format!("unknown discriminator '{}'", tag),
        None => format!("missing '{}' discriminator", DISCRIMINATOR_KEY),
    }
}

/// Knobs for the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Reject elements whose `type` field disagrees with `_type`.
    pub enforce_type_tag: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            enforce_type_tag: true,
        }
    }
}

/// Result of a lenient decode: the elements that decoded, in input order,
/// and one error per element that was skipped.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LenientDecode {
    pub components: Vec<Component>,
    pub skipped: Vec<DecodeError>,
}

/// Decode a payload with the default options.
pub fn decode(json: &str) -> Result<Vec<Component>, DecodeError> {
    decode_with(json, &DecodeOptions::default())
}

/// Decode a payload into an ordered component list.
///
/// Either every element decodes and the full list is returned, or the
/// first failing element's error is returned.
pub fn decode_with(json: &str, options: &DecodeOptions) -> Result<Vec<Component>, DecodeError> {
    logged(parse_payload(json).and_then(|value| decode_elements(&value, options)))
}

/// Decode an already-parsed payload value. Same rules as [`decode_with`].
pub fn decode_value(value: &Value, options: &DecodeOptions) -> Result<Vec<Component>, DecodeError> {
    logged(decode_elements(value, options))
}

/// Decode a single `_type`-tagged object rather than an array.
///
/// Errors report the object as element 0.
pub fn decode_component(json: &str, options: &DecodeOptions) -> Result<Component, DecodeError> {
    logged(parse_payload(json).and_then(|value| {
        if !value.is_object() {
            return Err(DecodeError::MalformedJson {
                reason: format!("expected a top-level object, found {}", json_type_name(&value)),
            });
        }
        decode_element(0, &value, options)
    }))
}

/// Decode a payload, skipping elements that fail instead of aborting.
///
/// A payload that is not a JSON array still fails as a whole.
pub fn decode_lenient(json: &str, options: &DecodeOptions) -> Result<LenientDecode, DecodeError> {
    let value = logged(parse_payload(json))?;
    let elements = logged(top_level_array(&value))?;

    let mut out = LenientDecode::default();
    for (index, element) in elements.iter().enumerate() {
        match decode_element(index, element, options) {
            Ok(component) => out.components.push(component),
            Err(e) => {
                tracing::warn!(index, category = e.category(), error = %e, "skipping component");
                out.skipped.push(e);
            }
        }
    }
    Ok(out)
}

fn logged<T>(result: Result<T, DecodeError>) -> Result<T, DecodeError> {
    if let Err(e) = &result {
        tracing::warn!(
            category = e.category(),
            error = %e,
            "failed to decode component payload"
        );
    }
    result
}

fn parse_payload(json: &str) -> Result<Value, DecodeError> {
    serde_json::from_str(json).map_err(|e| DecodeError::MalformedJson {
        reason: e.to_string(),
    })
}

fn top_level_array(value: &Value) -> Result<&[Value], DecodeError> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| DecodeError::MalformedJson {
            reason: format!("expected a top-level array, found {}", json_type_name(value)),
        })
}

fn decode_elements(value: &Value, options: &DecodeOptions) -> Result<Vec<Component>, DecodeError> {
    top_level_array(value)?
        .iter()
        .enumerate()
        .map(|(index, element)| decode_element(index, element, options))
        .collect()
}

fn decode_element(
    index: usize,
    element: &Value,
    options: &DecodeOptions,
) -> Result<Component, DecodeError> {
    let obj = element
        .as_object()
        .ok_or_else(|| DecodeError::MalformedJson {
            reason: format!(
                "element {} is {}, expected an object",
                index,
                json_type_name(element)
            ),
        })?;

    let discriminator = obj.get(DISCRIMINATOR_KEY);
    let kind = discriminator
        .and_then(|v| v.as_str())
        .and_then(ComponentKind::from_tag)
        .ok_or_else(|| DecodeError::UnknownDiscriminator {
            index,
            found: discriminator.filter(|v| !v.is_null()).map(|v| match v.as_str() {
                Some(s) => s.to_string(),
                None => v.to_string(),
            }),
        })?;

    let fields = Fields::root(obj, index, kind);

    let component = match kind {
        ComponentKind::Banner => Component::Banner(parse_banner(&fields, options)?),
        ComponentKind::Card => Component::Card(parse_card(&fields, options)?),
        ComponentKind::Button => Component::Button(parse_button(&fields, options)?),
        ComponentKind::Product => Component::Product(parse_product(&fields, options)?),
        ComponentKind::Transaction => {
            Component::Transaction(parse_transaction(&fields, options)?)
        }
        ComponentKind::Dashboard => Component::Dashboard(parse_dashboard(&fields, options)?),
        ComponentKind::Chart => Component::Chart(parse_chart(&fields, options)?),
        ComponentKind::Profile => Component::Profile(parse_profile(&fields, options)?),
        ComponentKind::Settings => Component::Settings(parse_settings(&fields, options)?),
    };

    Ok(component)
}

// ── Field access ────────────────────────────────────────────────────

/// A view over one JSON object being decoded, with enough context to
/// report where a violation happened.
struct Fields<'a> {
    obj: &'a Map<String, Value>,
    index: usize,
    kind: ComponentKind,
    /// Path of this object within the element, ending in '.', or empty.
    prefix: String,
}

impl<'a> Fields<'a> {
    fn root(obj: &'a Map<String, Value>, index: usize, kind: ComponentKind) -> Self {
        Fields {
            obj,
            index,
            kind,
            prefix: String::new(),
        }
    }

    /// View of the object at `field[position]`.
    fn nested(
        &self,
        field: &str,
        position: usize,
        value: &'a Value,
    ) -> Result<Fields<'a>, DecodeError> {
        let path = format!("{}{}[{}]", self.prefix, field, position);
        let obj = value.as_object().ok_or_else(|| DecodeError::SchemaViolation {
            index: self.index,
            kind: self.kind,
            path: path.clone(),
            message: format!("expected an object, found {}", json_type_name(value)),
        })?;
        Ok(Fields {
            obj,
            index: self.index,
            kind: self.kind,
            prefix: format!("{}.", path),
        })
    }

    fn violation_at(&self, path: String, message: String) -> DecodeError {
        DecodeError::SchemaViolation {
            index: self.index,
            kind: self.kind,
            path,
            message,
        }
    }

    fn violation(&self, field: &str, message: String) -> DecodeError {
        self.violation_at(format!("{}{}", self.prefix, field), message)
    }

    fn required(&self, field: &str) -> Result<&'a Value, DecodeError> {
        match self.obj.get(field) {
            None | Some(Value::Null) => Err(self.violation(field, "is required".to_string())),
            Some(v) => Ok(v),
        }
    }

    fn required_str(&self, field: &str) -> Result<String, DecodeError> {
        let v = self.required(field)?;
        v.as_str().map(|s| s.to_string()).ok_or_else(|| {
            self.violation(
                field,
                format!("expected a string, found {}", json_type_name(v)),
            )
        })
    }

    fn optional_str(&self, field: &str) -> Result<Option<String>, DecodeError> {
        match self.obj.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(self.violation(
                field,
                format!("expected a string, found {}", json_type_name(other)),
            )),
        }
    }

    fn required_array(&self, field: &str) -> Result<&'a [Value], DecodeError> {
        let v = self.required(field)?;
        v.as_array().map(Vec::as_slice).ok_or_else(|| {
            self.violation(
                field,
                format!("expected an array, found {}", json_type_name(v)),
            )
        })
    }

    fn required_object(&self, field: &str) -> Result<&'a Map<String, Value>, DecodeError> {
        let v = self.required(field)?;
        v.as_object().ok_or_else(|| {
            self.violation(
                field,
                format!("expected an object, found {}", json_type_name(v)),
            )
        })
    }

    fn string_list(&self, field: &str) -> Result<Vec<String>, DecodeError> {
        self.required_array(field)?
            .iter()
            .enumerate()
            .map(|(i, v)| {
                v.as_str().map(|s| s.to_string()).ok_or_else(|| {
                    self.violation_at(
                        format!("{}{}[{}]", self.prefix, field, i),
                        format!("expected a string, found {}", json_type_name(v)),
                    )
                })
            })
            .collect()
    }

    fn number_list(&self, field: &str) -> Result<Vec<f64>, DecodeError> {
        self.required_array(field)?
            .iter()
            .enumerate()
            .map(|(i, v)| {
                v.as_f64().ok_or_else(|| {
                    self.violation_at(
                        format!("{}{}[{}]", self.prefix, field, i),
                        format!("expected a number, found {}", json_type_name(v)),
                    )
                })
            })
            .collect()
    }

    /// Read the data-level `type` field, checking it against `expected`
    /// when the options ask for it.
    fn type_tag(
        &self,
        expected: ComponentKind,
        options: &DecodeOptions,
    ) -> Result<String, DecodeError> {
        let tag = self.required_str(TYPE_TAG_KEY)?;
        if options.enforce_type_tag && tag != expected.as_str() {
            return Err(self.violation(
                TYPE_TAG_KEY,
                format!("'{}' does not match discriminator '{}'", tag, expected),
            ));
        }
        Ok(tag)
    }
}

fn json_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ── Variant parsers ─────────────────────────────────────────────────

fn parse_banner(
    fields: &Fields<'_>,
    options: &DecodeOptions,
) -> Result<BannerComponent, DecodeError> {
    Ok(BannerComponent {
        type_tag: fields.type_tag(ComponentKind::Banner, options)?,
        title: fields.required_str("title")?,
        description: fields.required_str("description")?,
        countdown: fields.required_str("countdown")?,
        background_color: fields.required_str("backgroundColor")?,
    })
}

fn parse_card(fields: &Fields<'_>, options: &DecodeOptions) -> Result<CardComponent, DecodeError> {
    Ok(CardComponent {
        type_tag: fields.type_tag(ComponentKind::Card, options)?,
        title: fields.required_str("title")?,
        image_url: fields.required_str("imageUrl")?,
        description: fields.required_str("description")?,
    })
}

fn parse_button(
    fields: &Fields<'_>,
    options: &DecodeOptions,
) -> Result<ButtonComponent, DecodeError> {
    Ok(ButtonComponent {
        type_tag: fields.type_tag(ComponentKind::Button, options)?,
        text: fields.required_str("text")?,
        action: fields.required_str("action")?,
    })
}

fn parse_product(
    fields: &Fields<'_>,
    options: &DecodeOptions,
) -> Result<ProductComponent, DecodeError> {
    Ok(ProductComponent {
        type_tag: fields.type_tag(ComponentKind::Product, options)?,
        title: fields.required_str("title")?,
        image_url: fields.required_str("imageUrl")?,
        description: fields.required_str("description")?,
        price: fields.required_str("price")?,
    })
}

fn parse_transaction(
    fields: &Fields<'_>,
    options: &DecodeOptions,
) -> Result<Transaction, DecodeError> {
    Ok(Transaction {
        type_tag: fields.type_tag(ComponentKind::Transaction, options)?,
        title: fields.required_str("title")?,
        amount: fields.required_str("amount")?,
        date: fields.required_str("date")?,
    })
}

fn parse_dashboard(
    fields: &Fields<'_>,
    options: &DecodeOptions,
) -> Result<DashboardComponent, DecodeError> {
    let type_tag = fields.type_tag(ComponentKind::Dashboard, options)?;
    let balance = fields.required_str("balance")?;

    // Nested transactions are decoded structurally; a `_type` key on them
    // is ignored like any other unknown field.
    let transactions = fields
        .required_array("transactions")?
        .iter()
        .enumerate()
        .map(|(i, t)| parse_transaction(&fields.nested("transactions", i, t)?, options))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DashboardComponent {
        type_tag,
        balance,
        transactions,
    })
}

fn parse_chart(
    fields: &Fields<'_>,
    options: &DecodeOptions,
) -> Result<ChartComponent, DecodeError> {
    Ok(ChartComponent {
        type_tag: fields.type_tag(ComponentKind::Chart, options)?,
        title: fields.required_str("title")?,
        data: fields.number_list("data")?,
        labels: fields.string_list("labels")?,
    })
}

fn parse_profile(
    fields: &Fields<'_>,
    options: &DecodeOptions,
) -> Result<ProfileComponent, DecodeError> {
    let type_tag = fields.type_tag(ComponentKind::Profile, options)?;
    let name = fields.required_str("name")?;
    let avatar = fields.required_str("avatar")?;
    let bio = fields.required_str("bio")?;

    let mut stats = BTreeMap::new();
    for (key, v) in fields.required_object("stats")? {
        let count = v.as_i64().ok_or_else(|| {
            fields.violation(
                &format!("stats.{}", key),
                format!("expected an integer, found {}", json_type_name(v)),
            )
        })?;
        stats.insert(key.clone(), count);
    }

    Ok(ProfileComponent {
        type_tag,
        name,
        avatar,
        bio,
        stats,
    })
}

fn parse_settings(
    fields: &Fields<'_>,
    options: &DecodeOptions,
) -> Result<SettingsComponent, DecodeError> {
    let type_tag = fields.type_tag(ComponentKind::Settings, options)?;

    let sections = fields
        .required_array("sections")?
        .iter()
        .enumerate()
        .map(|(i, s)| parse_section(&fields.nested("sections", i, s)?))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SettingsComponent { type_tag, sections })
}

fn parse_section(fields: &Fields<'_>) -> Result<Section, DecodeError> {
    let title = fields.required_str("title")?;
    let items = fields
        .required_array("items")?
        .iter()
        .enumerate()
        .map(|(i, item)| parse_item(&fields.nested("items", i, item)?))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Section { title, items })
}

fn parse_item(fields: &Fields<'_>) -> Result<Item, DecodeError> {
    Ok(Item {
        title: fields.required_str("title")?,
        subtitle: fields.optional_str("subtitle")?,
        item_type: fields.required_str(TYPE_TAG_KEY)?,
        value: fields.optional_str("value")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode_json(payload: serde_json::Value) -> Result<Vec<Component>, DecodeError> {
        decode(&payload.to_string())
    }

    #[test]
    fn test_empty_array() {
        let result = decode("[]").unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_invalid_json() {
        match decode("[{\"_type\": ").unwrap_err() {
            DecodeError::MalformedJson { .. } => {}
            other => panic!("expected MalformedJson, got {:?}", other),
        }
    }

    #[test]
    fn test_top_level_object_rejected() {
        let payload = json!({"_type": "button", "type": "button", "text": "x", "action": "y"});
        let err = decode_json(payload).unwrap_err();
        match err {
            DecodeError::MalformedJson { reason } => {
                assert!(reason.contains("top-level array"), "reason: {}", reason)
            }
            other => panic!("expected MalformedJson, got {:?}", other),
        }
    }

    #[test]
    fn test_non_object_element_rejected() {
        let err = decode_json(json!([42])).unwrap_err();
        assert_eq!(err.category(), "malformed_json");
    }

    #[test]
    fn test_parse_button() {
        let result = decode_json(json!([{
            "_type": "button",
            "type": "button",
            "text": "Learn More",
            "action": "https://example.com/learn"
        }]))
        .unwrap();

        assert_eq!(result.len(), 1);
        match &result[0] {
            Component::Button(b) => {
                assert_eq!(b.type_tag, "button");
                assert_eq!(b.text, "Learn More");
                assert_eq!(b.action, "https://example.com/learn");
            }
            other => panic!("expected Button, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_banner_ignores_unknown_fields() {
        let result = decode_json(json!([{
            "_type": "banner",
            "type": "banner",
            "title": "Welcome!",
            "description": "Start your journey with us.",
            "countdown": "2024-12-31T23:59:59Z",
            "backgroundColor": "#FFAA00",
            "animation": {"kind": "fade"}
        }]))
        .unwrap();

        match &result[0] {
            Component::Banner(b) => {
                assert_eq!(b.title, "Welcome!");
                assert_eq!(b.countdown, "2024-12-31T23:59:59Z");
                assert_eq!(b.background_color, "#FFAA00");
            }
            other => panic!("expected Banner, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_dashboard_with_transactions() {
        let result = decode_json(json!([{
            "_type": "dashboard",
            "type": "dashboard",
            "balance": "$100.00",
            "transactions": [{
                "_type": "transaction",
                "type": "transaction",
                "title": "T1",
                "amount": "$10.00",
                "date": "2024-12-31T23:59:59Z"
            }]
        }]))
        .unwrap();

        match &result[0] {
            Component::Dashboard(d) => {
                assert_eq!(d.balance, "$100.00");
                assert_eq!(d.transactions.len(), 1);
                assert_eq!(d.transactions[0].title, "T1");
                assert_eq!(d.transactions[0].amount, "$10.00");
            }
            other => panic!("expected Dashboard, got {:?}", other),
        }
    }

    #[test]
    fn test_nested_transaction_without_discriminator() {
        let result = decode_json(json!([{
            "_type": "dashboard",
            "type": "dashboard",
            "balance": "$0.00",
            "transactions": [
                {"type": "transaction", "title": "T1", "amount": "$1.00", "date": "2024-01-01"}
            ]
        }]))
        .unwrap();

        match &result[0] {
            Component::Dashboard(d) => assert_eq!(d.transactions[0].date, "2024-01-01"),
            other => panic!("expected Dashboard, got {:?}", other),
        }
    }

    #[test]
    fn test_nested_transaction_missing_field_reports_path() {
        let err = decode_json(json!([{
            "_type": "dashboard",
            "type": "dashboard",
            "balance": "$0.00",
            "transactions": [
                {"type": "transaction", "title": "T1", "amount": "$1.00", "date": "d"},
                {"type": "transaction", "title": "T2", "date": "d"}
            ]
        }]))
        .unwrap_err();

        assert_eq!(
            err,
            DecodeError::SchemaViolation {
                index: 0,
                kind: ComponentKind::Dashboard,
                path: "transactions[1].amount".to_string(),
                message: "is required".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_chart_accepts_integers() {
        let result = decode_json(json!([{
            "_type": "chart",
            "type": "chart",
            "title": "Sales Chart",
            "data": [150, 200.5],
            "labels": ["January", "February", "March"]
        }]))
        .unwrap();

        match &result[0] {
            Component::Chart(c) => {
                assert_eq!(c.data, vec![150.0, 200.5]);
                assert_eq!(c.labels.len(), 3);
            }
            other => panic!("expected Chart, got {:?}", other),
        }
    }

    #[test]
    fn test_chart_non_numeric_data() {
        let err = decode(
            r#"[{"_type":"chart","type":"chart","title":"X","data":["bad"],"labels":[]}]"#,
        )
        .unwrap_err();

        match err {
            DecodeError::SchemaViolation { kind, path, .. } => {
                assert_eq!(kind, ComponentKind::Chart);
                assert_eq!(path, "data[0]");
            }
            other => panic!("expected SchemaViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_profile_stats() {
        let result = decode_json(json!([{
            "_type": "profile",
            "type": "profile",
            "name": "John Doe",
            "avatar": "https://example.com/avatar.jpg",
            "bio": "Developer and Designer",
            "stats": {"posts": 120, "followers": 300, "following": 150}
        }]))
        .unwrap();

        match &result[0] {
            Component::Profile(p) => {
                assert_eq!(p.name, "John Doe");
                assert_eq!(p.stats.len(), 3);
                assert_eq!(p.stats["followers"], 300);
            }
            other => panic!("expected Profile, got {:?}", other),
        }
    }

    #[test]
    fn test_profile_fractional_stat_rejected() {
        let err = decode_json(json!([{
            "_type": "profile",
            "type": "profile",
            "name": "n",
            "avatar": "a",
            "bio": "b",
            "stats": {"posts": 1.5}
        }]))
        .unwrap_err();

        match err {
            DecodeError::SchemaViolation { path, .. } => assert_eq!(path, "stats.posts"),
            other => panic!("expected SchemaViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_settings_optional_fields() {
        let result = decode_json(json!([{
            "_type": "settings",
            "type": "settings",
            "sections": [{
                "title": "General",
                "items": [
                    {"title": "Notifications", "subtitle": "Turn on/off notifications", "type": "toggle", "value": "true"},
                    {"title": "Sign out", "type": "action"},
                    {"title": "Nickname", "subtitle": null, "type": "input", "value": null}
                ]
            }]
        }]))
        .unwrap();

        match &result[0] {
            Component::Settings(s) => {
                let items = &s.sections[0].items;
                assert_eq!(s.sections[0].title, "General");
                assert_eq!(items[0].subtitle.as_deref(), Some("Turn on/off notifications"));
                assert!(items[0].is_enabled());
                assert_eq!(items[1].subtitle, None);
                assert_eq!(items[1].value, None);
                assert_eq!(items[1].item_type, "action");
                assert_eq!(items[2].subtitle, None);
                assert!(!items[2].is_enabled());
            }
            other => panic!("expected Settings, got {:?}", other),
        }
    }

    #[test]
    fn test_settings_item_wrong_type_reports_path() {
        let err = decode_json(json!([{
            "_type": "settings",
            "type": "settings",
            "sections": [
                {"title": "General", "items": []},
                {"title": "Privacy", "items": [{"title": 7, "type": "toggle"}]}
            ]
        }]))
        .unwrap_err();

        match err {
            DecodeError::SchemaViolation { path, message, .. } => {
                assert_eq!(path, "sections[1].items[0].title");
                assert_eq!(message, "expected a string, found a number");
            }
            other => panic!("expected SchemaViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_discriminator() {
        let err = decode_json(json!([{"_type": "widget", "type": "widget"}])).unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnknownDiscriminator {
                index: 0,
                found: Some("widget".to_string()),
            }
        );
        assert_eq!(err.to_string(), "element 0: unknown discriminator 'widget'");
    }

    #[test]
    fn test_missing_discriminator() {
        // The data-level `type` alone does not select a variant.
        let err = decode_json(json!([{"type": "button", "text": "a", "action": "b"}])).unwrap_err();
        assert_eq!(err, DecodeError::UnknownDiscriminator { index: 0, found: None });
        assert_eq!(err.to_string(), "element 0: missing '_type' discriminator");
    }

    #[test]
    fn test_non_string_discriminator() {
        let err = decode_json(json!([{"_type": 3}])).unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnknownDiscriminator {
                index: 0,
                found: Some("3".to_string()),
            }
        );
    }

    #[test]
    fn test_null_discriminator_is_missing() {
        let err = decode_json(json!([{"_type": null, "type": "button"}])).unwrap_err();
        assert_eq!(err, DecodeError::UnknownDiscriminator { index: 0, found: None });
        assert_eq!(err.to_string(), "element 0: missing '_type' discriminator");
    }

    #[test]
    fn test_missing_type_tag() {
        let err =
            decode_json(json!([{"_type": "button", "text": "a", "action": "b"}])).unwrap_err();
        match err {
            DecodeError::SchemaViolation { path, message, .. } => {
                assert_eq!(path, "type");
                assert_eq!(message, "is required");
            }
            other => panic!("expected SchemaViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_type_tag_mismatch() {
        let payload =
            json!([{"_type": "button", "type": "link", "text": "a", "action": "b"}]).to_string();

        let err = decode(&payload).unwrap_err();
        assert_eq!(err.category(), "schema_violation");

        let relaxed = DecodeOptions {
            enforce_type_tag: false,
        };
        let result = decode_with(&payload, &relaxed).unwrap();
        assert_eq!(result[0].kind(), ComponentKind::Button);
        assert_eq!(result[0].type_tag(), "link");
    }

    #[test]
    fn test_bad_element_fails_whole_batch() {
        let err = decode_json(json!([
            {"_type": "button", "type": "button", "text": "a", "action": "b"},
            {"_type": "button", "type": "button", "text": "c", "action": "d"},
            {"_type": "card", "type": "card", "title": "missing image and description"}
        ]))
        .unwrap_err();

        match err {
            DecodeError::SchemaViolation { index, kind, .. } => {
                assert_eq!(index, 2);
                assert_eq!(kind, ComponentKind::Card);
            }
            other => panic!("expected SchemaViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_lenient_skips_bad_elements() {
        let payload = json!([
            {"_type": "button", "type": "button", "text": "a", "action": "b"},
            {"_type": "widget"},
            "not an object",
            {"_type": "transaction", "type": "transaction", "title": "T", "amount": "$1", "date": "d"}
        ])
        .to_string();

        let result = decode_lenient(&payload, &DecodeOptions::default()).unwrap();
        assert_eq!(result.components.len(), 2);
        assert_eq!(result.components[0].kind(), ComponentKind::Button);
        assert_eq!(result.components[1].kind(), ComponentKind::Transaction);
        assert_eq!(result.skipped.len(), 2);
        assert_eq!(result.skipped[0].category(), "unknown_discriminator");
        assert_eq!(result.skipped[1].category(), "malformed_json");
    }

    #[test]
    fn test_lenient_still_rejects_non_array() {
        let err = decode_lenient("{}", &DecodeOptions::default()).unwrap_err();
        assert_eq!(err.category(), "malformed_json");
    }

    #[test]
    fn test_decode_value_matches_decode() {
        let payload = json!([{
            "_type": "card",
            "type": "card",
            "title": "t",
            "imageUrl": "u",
            "description": "d"
        }]);
        let from_value = decode_value(&payload, &DecodeOptions::default()).unwrap();
        let from_str = decode(&payload.to_string()).unwrap();
        assert_eq!(from_value, from_str);
    }

    #[test]
    fn test_decode_component_single_object() {
        let payload = json!({
            "_type": "product",
            "type": "product",
            "title": "Product 1",
            "imageUrl": "https://example.com/p1.jpg",
            "description": "d",
            "price": "$19.99"
        });
        match decode_component(&payload.to_string(), &DecodeOptions::default()).unwrap() {
            Component::Product(p) => {
                assert_eq!(p.title, "Product 1");
                assert_eq!(p.price, "$19.99");
            }
            other => panic!("expected Product, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_component_unknown_discriminator() {
        let err =
            decode_component(r#"{"_type": "widget"}"#, &DecodeOptions::default()).unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnknownDiscriminator {
                index: 0,
                found: Some("widget".to_string()),
            }
        );
    }

    #[test]
    fn test_decode_component_rejects_non_object() {
        let err = decode_component(
            r#"[{"_type": "button", "type": "button", "text": "a", "action": "b"}]"#,
            &DecodeOptions::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            DecodeError::MalformedJson {
                reason: "expected a top-level object, found an array".to_string(),
            }
        );
    }
}
