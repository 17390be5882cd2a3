//! Per-kind rendering rules for collection rows and search result lines.
//!
//! Every section shares one loader and one search routine; what differs is
//! looked up here through [`RenderRules::for_section`].

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::models::{
    CallRecord, ChatHit, ChatSummary, Contact, InstalledApp, KeylogEntry, SmsSummary,
};
use crate::dashboard::conversation::ConversationKind;
use crate::dashboard::format::{format_time, initial, or_empty, preview};
use crate::dashboard::section::Section;

pub const NO_RESULTS: &str = "No results found";

/// A conversation a row opens when clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenTarget {
    pub kind: ConversationKind,
    pub name: String,
}

impl OpenTarget {
    fn new(kind: ConversationKind, name: Option<&str>) -> Option<Self> {
        name.filter(|n| !n.is_empty()).map(|n| Self {
            kind,
            name: n.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub initial: String,
    pub title: String,
    pub details: Vec<String>,
    pub trailing: Vec<String>,
    pub opens: Option<OpenTarget>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    Card(Card),
    Table(Vec<String>),
}

impl Row {
    pub fn opens(&self) -> Option<&OpenTarget> {
        match self {
            Row::Card(card) => card.opens.as_ref(),
            Row::Table(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultLine {
    pub text: String,
    pub opens: Option<OpenTarget>,
}

/// Contents of a section's search results area.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchResults {
    #[default]
    Cleared,
    NoResults,
    Lines(Vec<ResultLine>),
}

pub struct RenderRules {
    pub row: fn(&Value) -> Option<Row>,
    pub result: fn(&Value) -> Option<ResultLine>,
}

impl RenderRules {
    pub fn for_section(section: Section) -> &'static RenderRules {
        &RULES[section.index()]
    }

    pub fn rows(&self, items: &[Value]) -> Vec<Row> {
        items.iter().filter_map(self.row).collect()
    }

    /// Falls back to the placeholder when no hit survives decoding.
    pub fn results(&self, items: &[Value]) -> SearchResults {
        let lines: Vec<ResultLine> = items.iter().filter_map(self.result).collect();
        if lines.is_empty() {
            return SearchResults::NoResults;
        }
        SearchResults::Lines(lines)
    }
}

// Indexed by `Section::index`.
static RULES: [RenderRules; 6] = [
    RenderRules { row: chat_row, result: chat_result },
    RenderRules { row: call_row, result: call_result },
    RenderRules { row: keylog_row, result: keylog_result },
    RenderRules { row: contact_row, result: contact_result },
    RenderRules { row: sms_row, result: sms_result },
    RenderRules { row: app_row, result: app_result },
];

/// Decodes one record; a record that is not an object is skipped.
pub(crate) fn decode<T: DeserializeOwned>(value: &Value) -> Option<T> {
    if !value.is_object() {
        log::warn!("skipping malformed record: {value}");
        return None;
    }
    match serde_json::from_value(value.clone()) {
        Ok(item) => Some(item),
        Err(e) => {
            log::warn!("skipping malformed record: {e}");
            None
        }
    }
}

fn chat_row(value: &Value) -> Option<Row> {
    let chat: ChatSummary = decode(value)?;
    let name = chat.name.as_deref();
    Some(Row::Card(Card {
        initial: initial(name),
        title: or_empty(name),
        details: vec![preview(chat.last_message.as_deref())],
        trailing: vec![format_time(chat.time.as_deref())],
        opens: OpenTarget::new(ConversationKind::Chat, name),
    }))
}

fn call_row(value: &Value) -> Option<Row> {
    let call: CallRecord = decode(value)?;
    let who = call.from_to.as_deref();
    Some(Row::Card(Card {
        initial: initial(who),
        title: or_empty(who),
        details: vec![or_empty(call.call_type.as_deref())],
        trailing: vec![
            format_time(call.time.as_deref()),
            format!("{} seconds", or_empty(call.duration.as_deref())),
        ],
        opens: None,
    }))
}

fn keylog_row(value: &Value) -> Option<Row> {
    let entry: KeylogEntry = decode(value)?;
    Some(Row::Table(vec![
        or_empty(entry.application.as_deref()),
        format_time(entry.time.as_deref()),
        or_empty(entry.text.as_deref()),
    ]))
}

fn contact_row(value: &Value) -> Option<Row> {
    let contact: Contact = decode(value)?;
    let name = contact.name.as_deref();
    Some(Row::Card(Card {
        initial: initial(name),
        title: or_empty(name),
        details: vec![
            or_empty(contact.phone_number.as_deref()),
            or_empty(contact.email()),
        ],
        trailing: vec![format_time(contact.last_contacted_dt.as_deref())],
        opens: None,
    }))
}

fn sms_row(value: &Value) -> Option<Row> {
    let sms: SmsSummary = decode(value)?;
    let who = sms.from_to.as_deref();
    Some(Row::Card(Card {
        initial: initial(who),
        title: or_empty(who),
        details: vec![preview(sms.text.as_deref())],
        trailing: vec![format_time(sms.time.as_deref())],
        opens: OpenTarget::new(ConversationKind::Sms, who),
    }))
}

fn app_row(value: &Value) -> Option<Row> {
    let app: InstalledApp = decode(value)?;
    let name = app.application_name.as_deref();
    Some(Row::Card(Card {
        initial: initial(name),
        title: or_empty(name),
        details: vec![or_empty(app.package_name.as_deref())],
        trailing: vec![or_empty(app.installed_date.as_deref())],
        opens: None,
    }))
}

fn chat_result(value: &Value) -> Option<ResultLine> {
    let hit: ChatHit = decode(value)?;
    Some(ResultLine {
        text: format!("{}: {}", or_empty(hit.contact()), or_empty(hit.text.as_deref())),
        opens: OpenTarget::new(ConversationKind::Chat, hit.contact()),
    })
}

fn call_result(value: &Value) -> Option<ResultLine> {
    let call: CallRecord = decode(value)?;
    Some(ResultLine {
        text: format!(
            "{}: {} - {}",
            or_empty(call.from_to.as_deref()),
            or_empty(call.call_type.as_deref()),
            format_time(call.time.as_deref())
        ),
        opens: None,
    })
}

fn keylog_result(value: &Value) -> Option<ResultLine> {
    let entry: KeylogEntry = decode(value)?;
    Some(ResultLine {
        text: format!(
            "{}: {} - {}",
            or_empty(entry.application.as_deref()),
            or_empty(entry.text.as_deref()),
            format_time(entry.time.as_deref())
        ),
        opens: None,
    })
}

fn contact_result(value: &Value) -> Option<ResultLine> {
    let contact: Contact = decode(value)?;
    let reach = contact.phone_number.as_deref().or(contact.email());
    Some(ResultLine {
        text: format!("{}: {}", or_empty(contact.name.as_deref()), or_empty(reach)),
        opens: None,
    })
}

fn sms_result(value: &Value) -> Option<ResultLine> {
    let sms: SmsSummary = decode(value)?;
    let who = sms.from_to.as_deref();
    Some(ResultLine {
        text: format!(
            "{}: {} - {}",
            or_empty(who),
            or_empty(sms.text.as_deref()),
            format_time(sms.time.as_deref())
        ),
        opens: OpenTarget::new(ConversationKind::Sms, who),
    })
}

fn app_result(value: &Value) -> Option<ResultLine> {
    let app: InstalledApp = decode(value)?;
    Some(ResultLine {
        text: format!(
            "{}: {}",
            or_empty(app.application_name.as_deref()),
            or_empty(app.package_name.as_deref())
        ),
        opens: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn card(section: Section, value: Value) -> Card {
        match (RenderRules::for_section(section).row)(&value) {
            Some(Row::Card(card)) => card,
            other => panic!("expected a card, got {other:?}"),
        }
    }

    #[test]
    fn chat_card_matches_list_layout() {
        let card = card(
            Section::Chats,
            json!({"name": "Alice", "last_message": "hello there friend", "time": "2024-01-01T10:00:00Z"}),
        );
        assert_eq!(card.initial, "A");
        assert_eq!(card.title, "Alice");
        assert_eq!(card.details, vec!["hello there friend"]);
        assert_eq!(card.trailing, vec!["10:00 AM"]);
        assert_eq!(
            card.opens,
            Some(OpenTarget { kind: ConversationKind::Chat, name: "Alice".into() })
        );
    }

    #[test]
    fn chat_preview_is_truncated() {
        let card = card(
            Section::Chats,
            json!({"name": "A", "last_message": "abcdefghijklmnopqrstuvwxyz0123456789"}),
        );
        assert_eq!(card.details, vec!["abcdefghijklmnopqrstuvwxyz0123"]);
        assert_eq!(card.trailing, vec![""]);
    }

    #[test]
    fn nameless_chat_renders_without_initial_or_click_target() {
        let card = card(Section::Chats, json!({"last_message": "?"}));
        assert_eq!(card.initial, "");
        assert_eq!(card.title, "");
        assert!(card.opens.is_none());
    }

    #[test]
    fn call_card_shows_duration_in_seconds() {
        let card = card(
            Section::Calls,
            json!({"from_to": "+15550100", "call_type": "incoming", "time": "2024-02-02 18:30:00", "duration": 65}),
        );
        assert_eq!(card.initial, "+");
        assert_eq!(card.details, vec!["incoming"]);
        assert_eq!(card.trailing, vec!["6:30 PM", "65 seconds"]);
    }

    #[test]
    fn keylog_renders_as_table_row() {
        let row = (RenderRules::for_section(Section::Keylogs).row)(
            &json!({"application": "Notes", "time": "2024-02-02 07:00:00", "text": "draft"}),
        );
        assert_eq!(
            row,
            Some(Row::Table(vec!["Notes".into(), "7:00 AM".into(), "draft".into()]))
        );
    }

    #[test]
    fn contact_card_blanks_missing_fields() {
        let card = card(Section::Contacts, json!({"name": "zed", "email": "z@x.io"}));
        assert_eq!(card.initial, "Z");
        assert_eq!(card.details, vec!["", "z@x.io"]);
        assert_eq!(card.trailing, vec![""]);
    }

    #[test]
    fn app_card_keeps_install_date_raw() {
        let card = card(
            Section::InstalledApps,
            json!({"application_name": "maps", "package_name": "com.maps", "installed_date": "2023-12-24"}),
        );
        assert_eq!(card.initial, "M");
        assert_eq!(card.trailing, vec!["2023-12-24"]);
    }

    #[test]
    fn one_malformed_record_does_not_stop_the_rest() {
        let rows = RenderRules::for_section(Section::Sms).rows(&[
            json!({"from_to": "Mum", "text": "call me"}),
            json!("not a record"),
            json!({"from_to": null, "text": 7}),
        ]);
        assert_eq!(rows.len(), 2);
        assert!(rows[0].opens().is_some());
        assert!(rows[1].opens().is_none());
    }

    #[test]
    fn empty_results_show_placeholder() {
        for section in Section::ALL {
            assert_eq!(RenderRules::for_section(section).results(&[]), SearchResults::NoResults);
        }
    }

    #[test]
    fn all_malformed_hits_show_placeholder() {
        let results = RenderRules::for_section(Section::Sms).results(&[json!("x"), json!(3)]);
        assert_eq!(results, SearchResults::NoResults);

        let mixed = RenderRules::for_section(Section::Sms)
            .results(&[json!("x"), json!({"from_to": "Dan", "text": "hi"})]);
        assert!(matches!(mixed, SearchResults::Lines(lines) if lines.len() == 1));
    }

    #[test]
    fn result_lines_per_kind() {
        let line = |section: Section, value: Value| {
            (RenderRules::for_section(section).result)(&value).unwrap()
        };
        let chat = line(Section::Chats, json!({"sender": "Bob", "text": "lunch?"}));
        assert_eq!(chat.text, "Bob: lunch?");
        assert_eq!(chat.opens.unwrap().name, "Bob");

        let contact = line(Section::Contacts, json!({"name": "Eve", "email_id": "e@x.io"}));
        assert_eq!(contact.text, "Eve: e@x.io");
        assert!(contact.opens.is_none());

        let sms = line(Section::Sms, json!({"from_to": "Dan", "text": "hi", "time": "2024-01-01T12:00:00Z"}));
        assert_eq!(sms.text, "Dan: hi - 12:00 PM");
        assert_eq!(sms.opens.unwrap().kind, ConversationKind::Sms);

        let app = line(Section::InstalledApps, json!({"application_name": "Maps", "package_name": "com.maps"}));
        assert_eq!(app.text, "Maps: com.maps");
    }
}
