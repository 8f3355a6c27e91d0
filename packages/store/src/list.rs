//! # Vehicle list engine
//!
//! Derives the visible slice of a vehicle collection from the filter bar and
//! the scroll position. Everything here is a pure transformation of data that
//! has already been fetched; nothing touches the network.
//!
//! - [`FilterState`] holds search text, make selection, sort key and sort
//!   direction, and knows how to match and order records.
//! - [`Pagination`] reveals the filtered list in pages of
//!   [`DEFAULT_PAGE_SIZE`] as the user scrolls.
//! - [`ScrollThrottle`] limits how often scroll events are evaluated. An
//!   event that lands inside the interval is not lost: one trailing
//!   evaluation runs when the interval ends.
//! - [`ListState`] ties filter and pagination together, resets pagination
//!   whenever a filter field changes, and reveals the next page when
//!   [`ScrollMetrics`] say the viewport is near the bottom.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::config::ListConfig;
use crate::models::VehicleRecord;

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const DEFAULT_SCROLL_THRESHOLD: f64 = 0.8;
pub const DEFAULT_SCROLL_THROTTLE_MS: f64 = 100.0;

/// Sort key selected in the "Order By" dropdown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderBy {
    #[default]
    DateAdded,
    Year,
    Make,
    Registration,
}

impl OrderBy {
    pub const ALL: [OrderBy; 4] = [
        OrderBy::DateAdded,
        OrderBy::Year,
        OrderBy::Make,
        OrderBy::Registration,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderBy::DateAdded => "dateAdded",
            OrderBy::Year => "year",
            OrderBy::Make => "make",
            OrderBy::Registration => "registration",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OrderBy::DateAdded => "Date Added",
            OrderBy::Year => "Year",
            OrderBy::Make => "Make",
            OrderBy::Registration => "Registration",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|o| o.as_str() == s)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortDirection::Asc => "Ascending",
            SortDirection::Desc => "Descending",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// The filter bar's state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search_term: String,
    /// Empty means all makes.
    pub selected_make: String,
    pub order_by: OrderBy,
    pub sort_direction: SortDirection,
}

impl FilterState {
    /// Whether `vehicle` passes both the make selection and the search text.
    pub fn matches(&self, vehicle: &VehicleRecord) -> bool {
        if !self.selected_make.is_empty()
            && vehicle.make.as_deref() != Some(self.selected_make.as_str())
        {
            return false;
        }
        if self.search_term.is_empty() {
            return true;
        }
        let term = self.search_term.to_lowercase();
        [
            &vehicle.registration,
            &vehicle.vin,
            &vehicle.make,
            &vehicle.model,
            &vehicle.created_at,
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&term))
    }

    /// Ordering for the selected key. Descending is the base ordering.
    pub fn compare(&self, a: &VehicleRecord, b: &VehicleRecord) -> Ordering {
        let desc = match self.order_by {
            OrderBy::DateAdded => b.created_at_millis().cmp(&a.created_at_millis()),
            OrderBy::Year => b.year().cmp(&a.year()),
            OrderBy::Make => locale_compare(
                b.make.as_deref().unwrap_or(""),
                a.make.as_deref().unwrap_or(""),
            ),
            OrderBy::Registration => {
                locale_compare(b.registration_or_default(), a.registration_or_default())
            }
        };
        match self.sort_direction {
            SortDirection::Desc => desc,
            SortDirection::Asc => desc.reverse(),
        }
    }

    /// Matching records in sort order. The sort is stable.
    pub fn apply<'a>(&self, vehicles: &'a [VehicleRecord]) -> Vec<&'a VehicleRecord> {
        let mut matched: Vec<&VehicleRecord> =
            vehicles.iter().filter(|v| self.matches(v)).collect();
        matched.sort_by(|a, b| self.compare(a, b));
        matched
    }
}

/// Case-insensitive comparison with a case-sensitive tie-break so the order stays total.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Distinct non-empty makes, sorted, for the make dropdown.
pub fn distinct_makes(vehicles: &[VehicleRecord]) -> Vec<String> {
    let mut makes: Vec<String> = vehicles
        .iter()
        .filter_map(|v| v.make.as_deref())
        .filter(|m| !m.trim().is_empty())
        .map(str::to_string)
        .collect();
    makes.sort_by(|a, b| locale_compare(a, b));
    makes.dedup();
    makes
}

/// Incremental reveal of a long list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    items_to_show: usize,
    page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    pub fn new(page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            items_to_show: page_size,
            page_size,
        }
    }

    pub fn items_to_show(&self) -> usize {
        self.items_to_show
    }

    pub fn load_more(&mut self) {
        self.items_to_show = self.items_to_show.saturating_add(self.page_size);
    }

    pub fn reset(&mut self) {
        self.items_to_show = self.page_size;
    }

    pub fn truncate<T>(&self, mut items: Vec<T>) -> Vec<T> {
        items.truncate(self.items_to_show);
        items
    }
}

/// Window scroll position at the time of a scroll event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_y: f64,
    pub viewport_height: f64,
    pub document_height: f64,
}

impl ScrollMetrics {
    /// Whether the bottom of the viewport is past `threshold` of the document.
    pub fn past_threshold(&self, threshold: f64) -> bool {
        if self.document_height <= 0.0 {
            return false;
        }
        (self.scroll_y + self.viewport_height) / self.document_height > threshold
    }
}

/// What the caller should do with a scroll event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollDecision {
    /// Evaluate the current position now.
    Evaluate,
    /// Schedule one trailing evaluation after this many milliseconds, then
    /// call [`ScrollThrottle::trailing_due`].
    Defer(f64),
    /// A trailing evaluation is already scheduled.
    Ignore,
}

/// At most one evaluation per interval, plus a trailing evaluation for
/// events that arrived while the interval was running.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollThrottle {
    interval_ms: f64,
    last_ms: Option<f64>,
    trailing: bool,
}

impl Default for ScrollThrottle {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLL_THROTTLE_MS)
    }
}

impl ScrollThrottle {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_ms: None,
            trailing: false,
        }
    }

    pub fn on_event(&mut self, now_ms: f64) -> ScrollDecision {
        match self.last_ms {
            Some(last) if now_ms - last < self.interval_ms => {
                if self.trailing {
                    ScrollDecision::Ignore
                } else {
                    self.trailing = true;
                    ScrollDecision::Defer(self.interval_ms - (now_ms - last))
                }
            }
            _ => {
                self.last_ms = Some(now_ms);
                self.trailing = false;
                ScrollDecision::Evaluate
            }
        }
    }

    /// The deferred timer fired. Returns true if the trailing evaluation is
    /// still owed, i.e. no event was evaluated in the meantime.
    pub fn trailing_due(&mut self, now_ms: f64) -> bool {
        if !std::mem::take(&mut self.trailing) {
            return false;
        }
        self.last_ms = Some(now_ms);
        true
    }
}

/// Filter and pagination for one list view.
#[derive(Clone, Debug, PartialEq)]
pub struct ListState {
    filter: FilterState,
    pagination: Pagination,
    scroll_threshold: f64,
}

impl Default for ListState {
    fn default() -> Self {
        Self::new(&ListConfig::default())
    }
}

impl ListState {
    pub fn new(config: &ListConfig) -> Self {
        Self {
            filter: FilterState::default(),
            pagination: Pagination::new(config.page_size),
            scroll_threshold: config.scroll_threshold,
        }
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn items_to_show(&self) -> usize {
        self.pagination.items_to_show()
    }

    pub fn set_search_term(&mut self, term: String) {
        self.filter.search_term = term;
        self.pagination.reset();
    }

    pub fn set_selected_make(&mut self, make: String) {
        self.filter.selected_make = make;
        self.pagination.reset();
    }

    pub fn set_order_by(&mut self, order_by: OrderBy) {
        self.filter.order_by = order_by;
        self.pagination.reset();
    }

    pub fn set_sort_direction(&mut self, direction: SortDirection) {
        self.filter.sort_direction = direction;
        self.pagination.reset();
    }

    /// Reveal another page when the viewport is near the bottom and matching
    /// records are still hidden. Returns whether a page was added.
    pub fn reveal_more(&mut self, metrics: ScrollMetrics, vehicles: &[VehicleRecord]) -> bool {
        if !self.near_bottom(metrics) || self.filtered(vehicles).len() <= self.items_to_show() {
            return false;
        }
        self.load_more();
        true
    }

    pub fn near_bottom(&self, metrics: ScrollMetrics) -> bool {
        metrics.past_threshold(self.scroll_threshold)
    }

    pub fn load_more(&mut self) {
        self.pagination.load_more();
    }

    /// Reset pagination without touching the filters, e.g. after a refetch.
    pub fn reset_pagination(&mut self) {
        self.pagination.reset();
    }

    /// All matching records, sorted.
    pub fn filtered<'a>(&self, vehicles: &'a [VehicleRecord]) -> Vec<&'a VehicleRecord> {
        self.filter.apply(vehicles)
    }

    /// The visible page: matching records, sorted, truncated to `items_to_show`.
    pub fn visible<'a>(&self, vehicles: &'a [VehicleRecord]) -> Vec<&'a VehicleRecord> {
        self.pagination.truncate(self.filtered(vehicles))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn vehicle(id: &str, make: &str, reg: &str, created: &str) -> VehicleRecord {
        VehicleRecord {
            id: id.into(),
            make: Some(make.into()),
            registration: Some(reg.into()),
            created_at: Some(created.into()),
            ..Default::default()
        }
    }

    fn sample() -> Vec<VehicleRecord> {
        vec![
            vehicle("1", "Ford", "AB1", "2024-01-01"),
            vehicle("2", "BMW", "CD2", "2024-02-01"),
        ]
    }

    fn regs(list: &[&VehicleRecord]) -> Vec<String> {
        list.iter()
            .map(|v| v.registration_or_default().to_string())
            .collect()
    }

    #[test]
    fn test_search_by_registration_ascending() {
        let vehicles = sample();
        let filter = FilterState {
            search_term: "cd".into(),
            order_by: OrderBy::Registration,
            sort_direction: SortDirection::Asc,
            ..Default::default()
        };
        assert_eq!(regs(&filter.apply(&vehicles)), vec!["CD2"]);
    }

    #[test]
    fn test_date_added_descending_puts_newest_first() {
        let vehicles = sample();
        let filter = FilterState::default();
        assert_eq!(regs(&filter.apply(&vehicles)), vec!["CD2", "AB1"]);
    }

    #[test]
    fn test_make_selection_is_exact() {
        let vehicles = sample();
        let filter = FilterState {
            selected_make: "ford".into(),
            ..Default::default()
        };
        assert!(filter.apply(&vehicles).is_empty());

        let filter = FilterState {
            selected_make: "Ford".into(),
            ..Default::default()
        };
        assert_eq!(regs(&filter.apply(&vehicles)), vec!["AB1"]);
    }

    #[test]
    fn test_search_covers_vin_model_and_created_at() {
        let mut vehicles = sample();
        vehicles[0].vin = Some("WVWZZZ3CZ9E123456".into());
        vehicles[1].model = Some("X5".into());

        let by_vin = FilterState { search_term: "wvw".into(), ..Default::default() };
        assert_eq!(regs(&by_vin.apply(&vehicles)), vec!["AB1"]);

        let by_model = FilterState { search_term: "x5".into(), ..Default::default() };
        assert_eq!(regs(&by_model.apply(&vehicles)), vec!["CD2"]);

        let by_date = FilterState { search_term: "2024-02".into(), ..Default::default() };
        assert_eq!(regs(&by_date.apply(&vehicles)), vec!["CD2"]);
    }

    #[test]
    fn test_missing_fields_do_not_panic() {
        let vehicles = vec![
            VehicleRecord { id: "bare".into(), ..Default::default() },
            vehicle("1", "Ford", "AB1", "2024-01-01"),
        ];
        for order_by in OrderBy::ALL {
            let filter = FilterState { order_by, ..Default::default() };
            assert_eq!(filter.apply(&vehicles).len(), 2);
        }
        let search = FilterState { search_term: "ab".into(), ..Default::default() };
        assert_eq!(search.apply(&vehicles).len(), 1);
    }

    #[test]
    fn test_year_sort_uses_leading_token() {
        let mut a = vehicle("a", "Ford", "A", "2024-01-01");
        a.manufacture_date = Some("2015-06-01".into());
        let mut b = vehicle("b", "Ford", "B", "2024-01-01");
        b.manufacture_date = Some("2021-01-01".into());
        let c = vehicle("c", "Ford", "C", "2024-01-01");
        let vehicles = vec![a, b, c];

        let desc = FilterState { order_by: OrderBy::Year, ..Default::default() };
        assert_eq!(regs(&desc.apply(&vehicles)), vec!["B", "A", "C"]);

        let asc = FilterState {
            order_by: OrderBy::Year,
            sort_direction: SortDirection::Asc,
            ..Default::default()
        };
        assert_eq!(regs(&asc.apply(&vehicles)), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_make_sort_ignores_case() {
        let vehicles = vec![
            vehicle("1", "audi", "A", "2024-01-01"),
            vehicle("2", "BMW", "B", "2024-01-01"),
            vehicle("3", "Citroen", "C", "2024-01-01"),
        ];
        let asc = FilterState {
            order_by: OrderBy::Make,
            sort_direction: SortDirection::Asc,
            ..Default::default()
        };
        assert_eq!(regs(&asc.apply(&vehicles)), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_distinct_makes() {
        let mut vehicles = sample();
        vehicles.push(vehicle("3", "Ford", "EF3", "2024-03-01"));
        vehicles.push(VehicleRecord { id: "4".into(), make: Some(" ".into()), ..Default::default() });
        assert_eq!(distinct_makes(&vehicles), vec!["BMW", "Ford"]);
    }

    const BOTTOM: ScrollMetrics =
        ScrollMetrics { scroll_y: 900.0, viewport_height: 100.0, document_height: 1000.0 };

    fn fleet(n: usize) -> Vec<VehicleRecord> {
        (0..n)
            .map(|i| vehicle(&i.to_string(), "Ford", &format!("R{i:03}"), "2024-01-01"))
            .collect()
    }

    #[test]
    fn test_pagination_resets_on_filter_change() {
        let vehicles = fleet(100);
        let mut state = ListState::default();

        assert!(state.reveal_more(BOTTOM, &vehicles));
        assert_eq!(state.items_to_show(), 40);
        assert!(state.reveal_more(BOTTOM, &vehicles));
        assert_eq!(state.items_to_show(), 60);

        state.set_search_term("r0".into());
        assert_eq!(state.items_to_show(), 20);
        assert!(state.reveal_more(BOTTOM, &vehicles));
        state.set_order_by(OrderBy::Make);
        assert_eq!(state.items_to_show(), 20);
        assert!(state.reveal_more(BOTTOM, &vehicles));
        state.set_selected_make("Ford".into());
        assert_eq!(state.items_to_show(), 20);
        assert!(state.reveal_more(BOTTOM, &vehicles));
        state.set_sort_direction(SortDirection::Asc);
        assert_eq!(state.items_to_show(), 20);
    }

    #[test]
    fn test_reveal_stops_when_nothing_is_hidden() {
        let vehicles = fleet(30);
        let mut state = ListState::default();
        let middle = ScrollMetrics { scroll_y: 100.0, viewport_height: 100.0, document_height: 1000.0 };

        assert!(!state.reveal_more(middle, &vehicles));
        assert!(state.reveal_more(BOTTOM, &vehicles));
        assert_eq!(state.items_to_show(), 40);
        assert!(!state.reveal_more(BOTTOM, &vehicles));
        assert_eq!(state.items_to_show(), 40);

        state.set_search_term("no such vehicle".into());
        assert!(!state.reveal_more(BOTTOM, &vehicles));
    }

    #[test]
    fn test_scroll_is_throttled() {
        let mut throttle = ScrollThrottle::new(100.0);
        assert_eq!(throttle.on_event(1000.0), ScrollDecision::Evaluate);
        assert_eq!(throttle.on_event(1050.0), ScrollDecision::Defer(50.0));
        assert_eq!(throttle.on_event(1099.0), ScrollDecision::Ignore);
        assert!(throttle.trailing_due(1100.0));
        assert!(!throttle.trailing_due(1100.0));
        assert_eq!(throttle.on_event(1150.0), ScrollDecision::Defer(50.0));
        assert_eq!(throttle.on_event(1250.0), ScrollDecision::Evaluate);
        assert!(!throttle.trailing_due(1251.0));
    }

    #[test]
    fn test_last_scroll_to_bottom_is_evaluated() {
        let vehicles = fleet(60);
        let mut throttle = ScrollThrottle::new(100.0);
        let mut state = ListState::default();
        let evaluate = |state: &mut ListState, metrics: ScrollMetrics| state.reveal_more(metrics, &vehicles);

        let three_quarters = ScrollMetrics { scroll_y: 650.0, viewport_height: 100.0, document_height: 1000.0 };
        assert_eq!(throttle.on_event(0.0), ScrollDecision::Evaluate);
        assert!(!evaluate(&mut state, three_quarters));

        // The user reaches the bottom inside the interval and stops.
        let ScrollDecision::Defer(delay) = throttle.on_event(50.0) else {
            panic!("bottom event should be deferred");
        };
        assert_eq!(state.items_to_show(), 20);
        assert!(throttle.trailing_due(50.0 + delay));
        assert!(evaluate(&mut state, BOTTOM));
        assert_eq!(state.items_to_show(), 40);
    }

    #[test]
    fn test_scroll_threshold() {
        let top = ScrollMetrics { scroll_y: 0.0, viewport_height: 800.0, document_height: 1000.0 };
        assert!(!top.past_threshold(0.8));
        let edge = ScrollMetrics { scroll_y: 1.0, viewport_height: 800.0, document_height: 1000.0 };
        assert!(edge.past_threshold(0.8));
        let empty = ScrollMetrics { scroll_y: 0.0, viewport_height: 800.0, document_height: 0.0 };
        assert!(!empty.past_threshold(0.8));
    }

    #[test]
    fn test_visible_truncates() {
        let vehicles = fleet(45);
        let mut state = ListState::default();
        let full = ScrollMetrics { scroll_y: 1.0, viewport_height: 1.0, document_height: 1.0 };
        assert_eq!(state.visible(&vehicles).len(), 20);
        state.reveal_more(full, &vehicles);
        assert_eq!(state.visible(&vehicles).len(), 40);
        state.reveal_more(full, &vehicles);
        assert_eq!(state.visible(&vehicles).len(), 45);
        assert!(!state.reveal_more(full, &vehicles));
    }

    fn arb_vehicle() -> impl Strategy<Value = VehicleRecord> {
        (
            "[a-zA-Z0-9]{0,6}",
            prop::option::of(prop::sample::select(vec!["Ford", "BMW", "Audi", "audi"])),
            prop::option::of("[A-Z]{2}[0-9]{2}"),
            prop::option::of(1990u32..2025),
            prop::option::of(1u32..28),
        )
            .prop_map(|(id, make, reg, year, day)| VehicleRecord {
                id,
                make: make.map(str::to_string),
                registration: reg,
                manufacture_date: year.map(|y| format!("{y}-01-01")),
                created_at: day.map(|d| format!("2024-01-{d:02}")),
                ..Default::default()
            })
    }

    fn arb_filter() -> impl Strategy<Value = FilterState> {
        (
            prop::sample::select(vec!["", "a", "ford", "20", "b1"]),
            prop::sample::select(vec!["", "Ford", "BMW", "audi"]),
            prop::sample::select(OrderBy::ALL.to_vec()),
            prop::bool::ANY,
        )
            .prop_map(|(term, make, order_by, asc)| FilterState {
                search_term: term.to_string(),
                selected_make: make.to_string(),
                order_by,
                sort_direction: if asc { SortDirection::Asc } else { SortDirection::Desc },
            })
    }

    proptest! {
        #[test]
        fn prop_output_is_exactly_the_matching_set(
            vehicles in prop::collection::vec(arb_vehicle(), 0..30),
            filter in arb_filter(),
        ) {
            let out = filter.apply(&vehicles);
            prop_assert!(out.iter().all(|v| filter.matches(v)));
            let expected = vehicles.iter().filter(|v| filter.matches(v)).count();
            prop_assert_eq!(out.len(), expected);
        }

        #[test]
        fn prop_filtering_is_idempotent(
            vehicles in prop::collection::vec(arb_vehicle(), 0..30),
            filter in arb_filter(),
        ) {
            let once: Vec<VehicleRecord> = filter.apply(&vehicles).into_iter().cloned().collect();
            let twice: Vec<VehicleRecord> = filter.apply(&once).into_iter().cloned().collect();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_output_is_sorted(
            vehicles in prop::collection::vec(arb_vehicle(), 0..30),
            filter in arb_filter(),
        ) {
            let out = filter.apply(&vehicles);
            for pair in out.windows(2) {
                prop_assert_ne!(filter.compare(pair[0], pair[1]), Ordering::Greater);
            }
        }

        #[test]
        fn prop_direction_flip_reverses_distinct_keys(
            vehicles in prop::collection::vec(arb_vehicle(), 0..30),
            filter in arb_filter(),
        ) {
            let flipped = FilterState { sort_direction: filter.sort_direction.toggled(), ..filter.clone() };
            let a = filter.apply(&vehicles);
            let b = flipped.apply(&vehicles);
            prop_assert_eq!(a.len(), b.len());
            for x in &a {
                for y in &a {
                    prop_assert_eq!(filter.compare(x, y), flipped.compare(x, y).reverse());
                }
            }
        }

        #[test]
        fn prop_pagination_is_bounded_and_monotonic(
            vehicles in prop::collection::vec(arb_vehicle(), 0..80),
            scrolls in prop::collection::vec((0.0f64..2000.0, 0.0f64..2000.0), 0..20),
        ) {
            let mut state = ListState::default();
            let mut previous = state.items_to_show();
            for (scroll_y, doc) in scrolls {
                state.reveal_more(ScrollMetrics { scroll_y, viewport_height: 500.0, document_height: doc }, &vehicles);
                prop_assert!(state.items_to_show() >= previous);
                prop_assert!(state.visible(&vehicles).len() <= state.items_to_show());
                previous = state.items_to_show();
            }
        }
    }
}
