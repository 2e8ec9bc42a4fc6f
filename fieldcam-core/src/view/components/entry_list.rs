//! src/view/components/entry_list.rs
//! ============================================================================
//! # `EntryList`: the pressable rows of the current location
//!
//! Row 0 is ".." away from the base folder, then the entries in filesystem
//! order. Every visible row is one hit region.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    widgets::{Block, Borders, Cell, HighlightSpacing, Row, Table, TableState},
};

use crate::controller::dispatch_table::{Target, UP_LABEL, row_targets};
use crate::fs::entry::EntryKind;
use crate::model::nav_state::Listing;
use crate::view::hit_map::HitMap;
use crate::view::{icons, theme};

pub struct EntryList;

impl EntryList {
    /// First visible row so that `selected` stays on screen.
    pub const fn scroll_offset(selected: usize, visible_rows: usize) -> usize {
        if visible_rows == 0 {
            0
        } else {
            selected.saturating_sub(visible_rows - 1)
        }
    }

    pub fn render(
        frame: &mut Frame<'_>,
        listing: &Listing,
        selected: usize,
        area: Rect,
        hits: &mut HitMap,
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} items ", listing.entries.len()))
            .title_style(theme::title_style())
            .border_style(theme::border_style())
            .style(theme::base_style());
        let inner = block.inner(area);

        let targets = row_targets(listing);
        let offset = Self::scroll_offset(selected, inner.height as usize);

        let rows: Vec<Row> = targets.iter().map(|target| Self::row(listing, target)).collect();

        let mut state = TableState::default()
            .with_offset(offset)
            .with_selected((!targets.is_empty()).then_some(selected));

        let table = Table::new(rows, [Constraint::Fill(1)])
            .block(block)
            .row_highlight_style(theme::highlight_style())
            .highlight_symbol("▶ ")
            .highlight_spacing(HighlightSpacing::Always);

        frame.render_stateful_widget(table, area, &mut state);

        for (i, target) in targets.into_iter().skip(offset).enumerate() {
            let Ok(dy) = u16::try_from(i) else { break };
            if dy >= inner.height {
                break;
            }
            hits.push(
                Rect {
                    x: inner.x,
                    y: inner.y + dy,
                    width: inner.width,
                    height: 1,
                },
                target,
            );
        }
    }

    fn row(listing: &Listing, target: &Target) -> Row<'static> {
        let (icon, style, name) = match target {
            Target::Up => (icons::UP_ICON, theme::up_entry_style(), UP_LABEL.to_string()),
            Target::Entry(name) => match listing.entry(name).map(|e| e.kind) {
                Some(EntryKind::Directory) => {
                    (icons::FOLDER_ICON, theme::directory_style(), target.label().to_string())
                }
                _ => (icons::FILE_ICON, theme::file_style(), target.label().to_string()),
            },
            _ => ("", theme::file_style(), target.label().to_string()),
        };

        Row::new(vec![Cell::from(format!("{icon} {name}"))]).style(style)
    }
}

#[cfg(test)]
mod tests {
    use super::EntryList;

    #[test]
    fn offset_keeps_selection_visible() {
        assert_eq!(EntryList::scroll_offset(0, 5), 0);
        assert_eq!(EntryList::scroll_offset(4, 5), 0);
        assert_eq!(EntryList::scroll_offset(7, 5), 3);
        assert_eq!(EntryList::scroll_offset(3, 0), 0);
    }
}
