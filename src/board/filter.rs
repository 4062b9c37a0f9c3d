use crate::domain::ticket::{Category, Priority, Ticket};

/// Search and filter state for the board. Every criterion must hold for a
/// ticket to be shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketFilter {
    pub search: String,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
}

impl TicketFilter {
    pub fn matches(&self, ticket: &Ticket) -> bool {
        self.matches_search(ticket)
            && self.category.is_none_or(|category| ticket.category == category)
            && self.priority.is_none_or(|priority| ticket.priority == priority)
    }

    fn matches_search(&self, ticket: &Ticket) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        ticket.title.to_lowercase().contains(&needle)
            || ticket
                .description
                .as_deref()
                .is_some_and(|description| description.to_lowercase().contains(&needle))
    }

    pub fn apply<'a>(&self, tickets: &'a [Ticket]) -> Vec<&'a Ticket> {
        tickets.iter().filter(|ticket| self.matches(ticket)).collect()
    }
}

/// Distinct categories present in the collection, sorted by name.
pub fn categories_present(tickets: &[Ticket]) -> Vec<Category> {
    let mut categories: Vec<Category> = tickets.iter().map(|ticket| ticket.category).collect();
    categories.sort_by_key(|category| category.as_str());
    categories.dedup();
    categories
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ticket::fixtures::ticket;

    fn sample() -> Vec<Ticket> {
        let mut vat = ticket(1, "VAT refund delayed");
        vat.category = Category::Vat;
        vat.priority = Priority::High;

        let mut deduction = ticket(2, "Home office");
        deduction.category = Category::Deductions;
        deduction.description = Some("Question about vat on equipment".to_string());

        let mut other = ticket(3, "Address change");
        other.priority = Priority::Low;

        vec![vat, deduction, other]
    }

    fn ids(tickets: Vec<&Ticket>) -> Vec<i64> {
        tickets.into_iter().map(|ticket| ticket.id).collect()
    }

    #[test]
    fn empty_filter_matches_everything() {
        let tickets = sample();
        assert_eq!(ids(TicketFilter::default().apply(&tickets)), vec![1, 2, 3]);
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_description() {
        let tickets = sample();
        let filter = TicketFilter {
            search: "VaT".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(filter.apply(&tickets)), vec![1, 2]);
    }

    #[test]
    fn search_ignores_missing_description() {
        let tickets = sample();
        let filter = TicketFilter {
            search: "equipment".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(filter.apply(&tickets)), vec![2]);
    }

    #[test]
    fn criteria_are_conjunctive() {
        let tickets = sample();
        let filter = TicketFilter {
            search: "vat".to_string(),
            category: Some(Category::Deductions),
            priority: Some(Priority::High),
        };
        assert!(filter.apply(&tickets).is_empty());

        let filter = TicketFilter {
            search: "vat".to_string(),
            category: Some(Category::Vat),
            priority: Some(Priority::High),
        };
        assert_eq!(ids(filter.apply(&tickets)), vec![1]);
    }

    #[test]
    fn lists_categories_sorted_and_distinct() {
        let mut tickets = sample();
        tickets.push(ticket(4, "Another"));
        assert_eq!(
            categories_present(&tickets),
            vec![Category::Deductions, Category::Other, Category::Vat]
        );
    }
}
