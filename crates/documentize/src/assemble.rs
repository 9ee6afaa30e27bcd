//! Builds the documentation block for a component.

use std::cmp::Ordering;

use documentize_markdown::{Alignment, Builder, Cell, Column, Heading, Paragraph, Row, Section, Table};

use crate::{error::DocumentizeError, metadata::Metadata};

const SECTION_LEVEL: i32 = 3;

/// Orders strings the way a human-facing listing does.
///
/// Letters compare case-insensitively first. Strings equal up to case put
/// lowercase before uppercase at the first differing position, and anything
/// still tied falls back to code point order.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let folded = |s: &str| s.chars().flat_map(char::to_lowercase).collect::<Vec<_>>();

    folded(a)
        .cmp(&folded(b))
        .then_with(|| {
            a.chars()
                .zip(b.chars())
                .find(|(x, y)| x != y)
                .map_or(Ordering::Equal, |(x, y)| {
                    match (x.is_lowercase(), y.is_lowercase()) {
                        (true, false) => Ordering::Less,
                        (false, true) => Ordering::Greater,
                        _ => Ordering::Equal,
                    }
                })
        })
        .then_with(|| a.cmp(b))
}

fn sorted<'m, T>(items: &'m [T], name: impl Fn(&T) -> &str) -> Vec<&'m T> {
    let mut items: Vec<&T> = items.iter().collect();
    items.sort_by(|a, b| locale_compare(name(*a), name(*b)));
    items
}

fn code(name: &str) -> String {
    format!("`{name}`")
}

fn left(header: &str) -> Column {
    Column::new(Alignment::Left).with(header)
}

fn section(title: &str) -> Result<Section, DocumentizeError> {
    Ok(Section::new(Heading::new(SECTION_LEVEL, title)?))
}

/// Builds the document tree for `metadata`.
///
/// # Errors
///
/// Fails only if a heading cannot be constructed.
pub fn build_document(metadata: &Metadata) -> Result<Builder, DocumentizeError> {
    let mut events = section("Events")?;
    if metadata.events().is_empty() {
        events.push(Paragraph::from_text(
            "This component does not dispatch any events.",
        ));
    } else {
        events.push(Paragraph::from_text(
            "The following events are dispatched by this component:",
        ));
        events.push(Table::new(
            vec![left("Event")],
            sorted(metadata.events(), |event| event.name())
                .into_iter()
                .map(|event| Row::new().with(Cell::from_text(code(event.name()))))
                .collect(),
        ));
    }

    let mut props = section("Props")?;
    if metadata.props().is_empty() {
        props.push(Paragraph::from_text(
            "This component does not have any props.",
        ));
    } else {
        props.push(Paragraph::from_text(
            "The following props are available for this component:",
        ));
        props.push(Table::new(
            vec![left("Prop"), left("Description")],
            sorted(metadata.props(), |prop| prop.name())
                .into_iter()
                .map(|prop| {
                    Row::new()
                        .with(Cell::from_text(code(prop.name())))
                        .with(Cell::new())
                })
                .collect(),
        ));
    }

    let mut slots = section("Slots")?;
    if metadata.slots().is_empty() {
        slots.push(Paragraph::from_text(
            "This component does not have any slots.",
        ));
    } else {
        slots.push(Paragraph::from_text(
            "The following slots are available for this component:",
        ));

        let mut rows = Vec::new();
        for slot in sorted(metadata.slots(), |slot| slot.name()) {
            rows.push(
                Row::new()
                    .with(Cell::from_text(code(slot.name())))
                    .with(Cell::new()),
            );
            for property in sorted(slot.properties(), |property| property.name()) {
                rows.push(
                    Row::new()
                        .with(Cell::new())
                        .with(Cell::from_text(code(property.name()))),
                );
            }
        }
        slots.push(Table::new(vec![left("Slot"), left("Prop")], rows));
    }

    Ok(Builder::new()
        .with(Paragraph::from_text(metadata.description()))
        .with(events)
        .with(props)
        .with(slots))
}

/// Renders the documentation block for `metadata` as Markdown.
///
/// # Errors
///
/// Propagates [`DocumentizeError::Markdown`] from building or rendering.
pub fn render_markdown(metadata: &Metadata) -> Result<String, DocumentizeError> {
    Ok(build_document(metadata)?.render()?)
}
