//! Kanban board: column layouts, status grouping and move commands.
//!
//! Grouping is a pure function of an already filtered ticket slice, so the
//! board can be rebuilt on every change without any cached state.

pub mod filter;
pub mod metrics;

use crate::domain::ticket::{Ticket, TicketId, TicketPatch, TicketStatus};

pub use filter::{TicketFilter, categories_present};
pub use metrics::Metrics;

/// The two supported column configurations. They are alternatives, never
/// combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BoardLayout {
    /// new / in progress / resolved, where `closed` shares the resolved column.
    #[default]
    Dashboard,
    /// new / in progress / done.
    Simple,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnId {
    New,
    InProgress,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub id: ColumnId,
    pub key: &'static str,
    pub title: &'static str,
    /// Status written to a ticket dropped on this column.
    pub drop_status: TicketStatus,
}

impl BoardLayout {
    pub fn columns(&self) -> [ColumnSpec; 3] {
        let finished = match self {
            BoardLayout::Dashboard => ColumnSpec {
                id: ColumnId::Finished,
                key: "resolved",
                title: "Resolved",
                drop_status: TicketStatus::Resolved,
            },
            BoardLayout::Simple => ColumnSpec {
                id: ColumnId::Finished,
                key: "done",
                title: "Done",
                drop_status: TicketStatus::Done,
            },
        };
        [
            ColumnSpec {
                id: ColumnId::New,
                key: "new",
                title: "New",
                drop_status: TicketStatus::New,
            },
            ColumnSpec {
                id: ColumnId::InProgress,
                key: "in_progress",
                title: "In Progress",
                drop_status: TicketStatus::InProgress,
            },
            finished,
        ]
    }

    pub fn column(&self, id: ColumnId) -> ColumnSpec {
        match id {
            ColumnId::New => self.columns()[0],
            ColumnId::InProgress => self.columns()[1],
            ColumnId::Finished => self.columns()[2],
        }
    }

    /// Resolves a column by its key, accepting `-` for `_`.
    pub fn column_by_key(&self, key: &str) -> Option<ColumnSpec> {
        let wanted = key.trim().to_lowercase().replace('-', "_");
        self.columns().into_iter().find(|column| column.key == wanted)
    }

    /// Every status lands in exactly one column.
    pub fn column_for(&self, status: TicketStatus) -> ColumnId {
        match status {
            TicketStatus::New => ColumnId::New,
            TicketStatus::InProgress => ColumnId::InProgress,
            TicketStatus::Resolved | TicketStatus::Closed | TicketStatus::Done => {
                ColumnId::Finished
            }
        }
    }

    pub fn group<'a>(&self, tickets: &[&'a Ticket]) -> Vec<Column<'a>> {
        self.columns()
            .into_iter()
            .map(|spec| Column {
                spec,
                tickets: tickets
                    .iter()
                    .copied()
                    .filter(|ticket| self.column_for(ticket.status) == spec.id)
                    .collect(),
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct Column<'a> {
    pub spec: ColumnSpec,
    pub tickets: Vec<&'a Ticket>,
}

impl Column<'_> {
    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}

/// "Move ticket X to column Y". Any ticket may move to any column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveTicket {
    pub id: TicketId,
    pub column: ColumnId,
}

impl MoveTicket {
    pub fn patch(&self, layout: BoardLayout) -> TicketPatch {
        TicketPatch::status(layout.column(self.column).drop_status)
    }
}

/// Totals shown above the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub total: usize,
    pub new: usize,
    pub in_progress: usize,
    pub finished: usize,
}

impl StatusCounts {
    pub fn from_columns(total: usize, columns: &[Column<'_>]) -> Self {
        let mut counts = StatusCounts {
            total,
            ..Default::default()
        };
        for column in columns {
            match column.spec.id {
                ColumnId::New => counts.new += column.len(),
                ColumnId::InProgress => counts.in_progress += column.len(),
                ColumnId::Finished => counts.finished += column.len(),
            }
        }
        counts
    }
}
