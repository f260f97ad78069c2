use rand::SeedableRng;
use rand::rngs::StdRng;
use treetable_lib::filter::{FilterRecord, NameMatch, ProjectFilter, current_step_index};
use treetable_lib::sample;

#[derive(Debug, PartialEq)]
struct Row {
    id: u32,
    kind: &'static str,
    name: &'static str,
    schedule: &'static str,
}

impl FilterRecord for Row {
    fn type_key(&self) -> String {
        self.kind.to_string()
    }

    fn name(&self) -> &str {
        self.name
    }

    fn schedule_key(&self) -> String {
        self.schedule.to_string()
    }
}

fn rows() -> Vec<Row> {
    vec![
        Row { id: 1, kind: "A", name: "Alpha", schedule: "1" },
        Row { id: 2, kind: "B", name: "Beta", schedule: "2" },
    ]
}

fn ids(matched: &[&Row]) -> Vec<u32> {
    matched.iter().map(|row| row.id).collect()
}

// ============================================================================
// Combination
// ============================================================================

#[test]
fn test_empty_filter_passes_everything() {
    let rows = rows();
    let filter = ProjectFilter::new();
    assert!(filter.is_empty());
    assert_eq!(ids(&filter.apply(&rows)), vec![1, 2]);
}

#[test]
fn test_type_filter() {
    let rows = rows();
    let filter = ProjectFilter::new().with_type("A");
    assert_eq!(ids(&filter.apply(&rows)), vec![1]);
}

#[test]
fn test_name_filter_substring_case_insensitive() {
    let rows = rows();
    assert_eq!(ids(&ProjectFilter::new().with_name("eta").apply(&rows)), vec![2]);
    assert_eq!(ids(&ProjectFilter::new().with_name("ALP").apply(&rows)), vec![1]);
}

#[test]
fn test_disjoint_dimensions_yield_nothing() {
    let rows = rows();
    let filter = ProjectFilter::new().with_type("A").with_name("eta");
    assert_eq!(filter.active_count(), 2);
    assert!(filter.apply(&rows).is_empty());
}

#[test]
fn test_set_dimension_is_any_of() {
    let rows = rows();
    let filter = ProjectFilter::new().with_type("A").with_type("B");
    assert_eq!(ids(&filter.apply(&rows)), vec![1, 2]);

    let filter = ProjectFilter::new().with_schedule("2").with_schedule("7");
    assert_eq!(ids(&filter.apply(&rows)), vec![2]);
}

#[test]
fn test_matches_single_record() {
    let rows = rows();
    let filter = ProjectFilter::new().with_schedule("1");
    assert!(filter.matches(&rows[0]));
    assert!(!filter.matches(&rows[1]));
}

// ============================================================================
// Editing filters
// ============================================================================

#[test]
fn test_toggle_adds_then_removes() {
    let mut filter = ProjectFilter::new();
    assert!(filter.toggle_type("A"));
    assert!(filter.types().contains("A"));
    assert!(!filter.toggle_type("A"));
    assert!(filter.is_empty());

    assert!(filter.toggle_schedule("3"));
    assert_eq!(filter.schedules().len(), 1);
}

#[test]
fn test_clear_resets_all_dimensions() {
    let mut filter = ProjectFilter::new().with_type("A").with_schedule("1");
    filter.set_name("al");
    assert_eq!(filter.active_count(), 3);

    filter.clear();

    assert!(filter.is_empty());
    assert_eq!(filter.name(), "");
}

#[test]
fn test_fuzzy_name_match() {
    let rows = rows();
    let filter = ProjectFilter::new()
        .with_name("apa")
        .with_name_match(NameMatch::Fuzzy);
    assert_eq!(ids(&filter.apply(&rows)), vec![1]);

    let substring = ProjectFilter::new().with_name("apa");
    assert!(substring.apply(&rows).is_empty());
}

// ============================================================================
// Projects
// ============================================================================

#[test]
fn test_projects_filter_by_type_and_schedule() {
    let mut rng = StdRng::seed_from_u64(7);
    let projects = sample::projects(&mut rng);
    assert!(projects.len() >= 8 && projects.len() <= 16);

    let filter = ProjectFilter::new().with_type("2");
    let cars = filter.apply(&projects);
    assert!(!cars.is_empty());
    assert!(cars.iter().all(|p| p.type_name == "Car"));

    let first = &projects[0];
    let filter = ProjectFilter::new().with_schedule(first.schedule_id());
    assert!(filter.apply(&projects).contains(&first));
}

#[test]
fn test_projects_sorted_by_type_then_priority() {
    let mut rng = StdRng::seed_from_u64(11);
    let projects = sample::projects(&mut rng);

    for pair in projects.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(a.type_id <= b.type_id);
        if a.type_id == b.type_id {
            assert!(a.priority >= b.priority);
        }
    }
}

#[test]
fn test_current_step_is_first_incomplete() {
    let mut rng = StdRng::seed_from_u64(3);
    for project in sample::projects(&mut rng) {
        assert_eq!(project.current_step, current_step_index(&project.schedule));
        let before = &project.schedule[..project.current_step];
        assert!(before.iter().all(|step| step.completed));
    }
}
