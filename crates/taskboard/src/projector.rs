/*
[INPUT]:  Unordered TaskRecords from a successful fetch
[OUTPUT]: Ordered DisplayItem sequence with status section headers
[POS]:    Board core - pure grouping/sorting transform
[UPDATE]: When grouping order or header labeling rules change
*/

use taskboard_adapter::TaskRecord;

/// Header text for records with an absent or blank status
pub const UNKNOWN_STATUS_LABEL: &str = "Unknown Status";

/// Ordering stand-in for absent or empty status. Never shown as a label.
const ABSENT_STATUS_SORT_KEY: &str = "progress";

/// Unit the renderer consumes: a section header or a task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayItem {
    Header(String),
    Item(TaskRecord),
}

impl DisplayItem {
    pub fn header(&self) -> Option<&str> {
        match self {
            DisplayItem::Header(label) => Some(label),
            DisplayItem::Item(_) => None,
        }
    }

    pub fn record(&self) -> Option<&TaskRecord> {
        match self {
            DisplayItem::Header(_) => None,
            DisplayItem::Item(record) => Some(record),
        }
    }
}

/// Header label plus the number of tasks under it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub label: String,
    pub count: usize,
}

/// Group records by status, descending, with a header at every status change.
///
/// Records sort by status with plain string comparison (absent or empty status
/// sorts as "progress", whitespace sorts as itself), then the whole order is
/// reversed. The sort is stable;
/// ties keep no particular secondary order.
pub fn project(records: &[TaskRecord]) -> Vec<DisplayItem> {
    let mut ordered: Vec<&TaskRecord> = records.iter().collect();
    ordered.sort_by(|a, b| sort_key(a).cmp(sort_key(b)));
    ordered.reverse();

    let mut items = Vec::with_capacity(ordered.len() * 2);
    // None until the first record, so the first group always gets a header.
    let mut current_group: Option<Option<&str>> = None;
    for record in ordered {
        let group = record.known_status();
        if current_group != Some(group) {
            items.push(DisplayItem::Header(header_label(record.status.as_deref())));
            current_group = Some(group);
        }
        items.push(DisplayItem::Item(record.clone()));
    }
    items
}

fn sort_key(record: &TaskRecord) -> &str {
    record
        .status
        .as_deref()
        .filter(|status| !status.is_empty())
        .unwrap_or(ABSENT_STATUS_SORT_KEY)
}

/// "Unknown Status" for absent/blank, otherwise the status with a lowercase
/// first character title-cased.
pub fn header_label(status: Option<&str>) -> String {
    match status.filter(|status| !status.trim().is_empty()) {
        None => UNKNOWN_STATUS_LABEL.to_string(),
        Some(status) => {
            let mut chars = status.chars();
            match chars.next() {
                Some(first) if first.is_lowercase() => {
                    let mut label = titlecase(first);
                    label.extend(chars);
                    label
                }
                _ => status.to_string(),
            }
        }
    }
}

/// Title case of a single character.
///
/// std only has upper case, which differs for digraphs (`ǆ` is `ǅ`, not `Ǆ`)
/// and for characters that expand (`ß` is `Ss`, not `SS`).
fn titlecase(ch: char) -> String {
    match ch {
        '\u{01C4}'..='\u{01C6}' => '\u{01C5}'.to_string(),
        '\u{01C7}'..='\u{01C9}' => '\u{01C8}'.to_string(),
        '\u{01CA}'..='\u{01CC}' => '\u{01CB}'.to_string(),
        '\u{01F1}'..='\u{01F3}' => '\u{01F2}'.to_string(),
        _ => {
            let mut upper = ch.to_uppercase();
            let mut out = String::new();
            if let Some(first) = upper.next() {
                out.push(first);
            }
            out.extend(upper.flat_map(char::to_lowercase));
            out
        }
    }
}

/// One-line row text for a task: `[id] title`
pub fn item_label(record: &TaskRecord) -> String {
    format!("[{}] {}", record.id, record.title)
}

/// Header pinned above a list scrolled so that `top_index` is the first visible row
pub fn sticky_header(items: &[DisplayItem], top_index: usize) -> Option<&str> {
    if items.is_empty() {
        return None;
    }
    let end = top_index.min(items.len() - 1);
    items[..=end].iter().rev().find_map(DisplayItem::header)
}

pub fn sections(items: &[DisplayItem]) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();
    for item in items {
        match item {
            DisplayItem::Header(label) => sections.push(Section {
                label: label.clone(),
                count: 0,
            }),
            DisplayItem::Item(_) => {
                if let Some(section) = sections.last_mut() {
                    section.count += 1;
                }
            }
        }
    }
    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn record(id: &str, status: Option<&str>) -> TaskRecord {
        TaskRecord::new(id, format!("task {id}"), status)
    }

    fn header(label: &str) -> DisplayItem {
        DisplayItem::Header(label.to_string())
    }

    fn item(id: &str, status: Option<&str>) -> DisplayItem {
        DisplayItem::Item(record(id, status))
    }

    #[test]
    fn placeholder_and_blank_interaction() {
        let input = vec![
            record("a", Some("done")),
            record("b", Some("")),
            record("c", Some("progress")),
            record("d", Some("done")),
        ];

        let output = project(&input);

        assert_eq!(
            output,
            vec![
                header("Progress"),
                item("c", Some("progress")),
                header(UNKNOWN_STATUS_LABEL),
                item("b", Some("")),
                header("Done"),
                item("d", Some("done")),
                item("a", Some("done")),
            ]
        );
    }

    #[test]
    fn statuses_come_out_descending() {
        let input = vec![
            record("1", Some("completed")),
            record("2", Some("progress")),
            record("3", Some("created")),
        ];

        let labels: Vec<_> = project(&input)
            .iter()
            .filter_map(DisplayItem::header)
            .map(str::to_string)
            .collect();

        assert_eq!(labels, vec!["Progress", "Created", "Completed"]);
    }

    #[test]
    fn empty_input_projects_to_nothing() {
        assert!(project(&[]).is_empty());
    }

    #[test]
    fn whitespace_status_sorts_as_itself() {
        let output = project(&[record("ws", Some("  ")), record("d", Some("done"))]);

        assert_eq!(
            output,
            vec![
                header("Done"),
                item("d", Some("done")),
                header(UNKNOWN_STATUS_LABEL),
                item("ws", Some("  ")),
            ]
        );
    }

    #[test]
    fn empty_status_sorts_as_progress() {
        let output = project(&[
            record("e", Some("")),
            record("d", Some("done")),
            record("q", Some("queued")),
        ]);

        let ids: Vec<_> = output
            .iter()
            .filter_map(DisplayItem::record)
            .map(|record| record.id.to_string())
            .collect();
        assert_eq!(ids, vec!["q", "e", "d"]);
    }

    #[test]
    fn absent_and_blank_status_share_a_group() {
        let input = vec![record("x", None), record("y", Some("  ")), record("z", Some(""))];

        let output = project(&input);

        assert_eq!(output.len(), 4);
        assert_eq!(output[0], header(UNKNOWN_STATUS_LABEL));
        assert!(output[1..].iter().all(|item| item.record().is_some()));
    }

    #[test]
    fn first_record_always_gets_a_header() {
        let output = project(&[record("only", None)]);
        assert_eq!(output, vec![header(UNKNOWN_STATUS_LABEL), item("only", None)]);
    }

    #[test]
    fn projection_is_idempotent() {
        let input = vec![
            record("1", Some("done")),
            record("2", None),
            record("3", Some("created")),
            record("4", Some("done")),
        ];
        assert_eq!(project(&input), project(&input));
    }

    #[rstest]
    #[case(Some("done"), "Done")]
    #[case(Some("IN_PROGRESS"), "IN_PROGRESS")]
    #[case(Some("in review"), "In review")]
    #[case(Some("éxito"), "Éxito")]
    #[case(Some("2fa"), "2fa")]
    #[case(Some("ßtatus"), "Sstatus")]
    #[case(Some("ǆungla"), "ǅungla")]
    #[case(Some("ﬀ"), "Ff")]
    #[case(Some(""), UNKNOWN_STATUS_LABEL)]
    #[case(Some("   "), UNKNOWN_STATUS_LABEL)]
    #[case(None, UNKNOWN_STATUS_LABEL)]
    fn header_labels(#[case] status: Option<&str>, #[case] expected: &str) {
        assert_eq!(header_label(status), expected);
    }

    #[test]
    fn sticky_header_tracks_scroll_position() {
        let items = project(&[
            record("a", Some("done")),
            record("b", Some("progress")),
            record("c", Some("progress")),
        ]);
        // [Progress, b|c, c|b, Done, a]
        assert_eq!(sticky_header(&items, 0), Some("Progress"));
        assert_eq!(sticky_header(&items, 2), Some("Progress"));
        assert_eq!(sticky_header(&items, 3), Some("Done"));
        assert_eq!(sticky_header(&items, 4), Some("Done"));
        assert_eq!(sticky_header(&items, 99), Some("Done"));
        assert_eq!(sticky_header(&[], 0), None);
    }

    #[test]
    fn sections_count_items_per_header() {
        let items = project(&[
            record("a", Some("done")),
            record("b", None),
            record("c", Some("done")),
        ]);

        assert_eq!(
            sections(&items),
            vec![
                Section {
                    label: UNKNOWN_STATUS_LABEL.to_string(),
                    count: 1
                },
                Section {
                    label: "Done".to_string(),
                    count: 2
                },
            ]
        );
    }

    #[test]
    fn item_label_shows_id_and_title() {
        assert_eq!(item_label(&record("7", Some("done"))), "[7] task 7");
    }
}
