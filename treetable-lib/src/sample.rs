//! Sample data for demos and tests.

use chrono::NaiveDate;
use rand::Rng;

use crate::filter::{Priority, Project, SCHEDULE_STEPS, ScheduleStep, current_step_index};
use crate::model::{Item, Node, Tree};

fn animal(id: u64, name: &str, habitat: &str, conservation: &str, population: &str) -> Item {
    Item::new(id, name)
        .with_attribute("habitat", habitat)
        .with_attribute("conservation", conservation)
        .with_attribute("population", population)
}

/// The animal catalogue: class → region → country → animals.
///
/// `asia` and `korea` appear under both classes, which makes it a handy
/// fixture for position-dependent identity.
pub fn animals() -> Tree {
    Tree::new(vec![
        Node::root(
            "birds",
            "Birds",
            vec![Node::branch(
                "asia",
                "Asia",
                vec![
                    Node::leaf(
                        "korea",
                        "Korea",
                        vec![
                            animal(1, "Sparrow", "Urban", "Least Concern", "Abundant"),
                            animal(2, "Magpie", "Urban/Rural", "Least Concern", "Common"),
                            animal(3, "Korean Crow", "Forests", "Least Concern", "Stable"),
                            animal(4, "Oriental Stork", "Wetlands", "Endangered", "Declining"),
                        ],
                    ),
                    Node::leaf(
                        "japan",
                        "Japan",
                        vec![
                            animal(6, "Japanese White-eye", "Forests", "Least Concern", "Stable"),
                            animal(7, "Japanese Tit", "Forests", "Least Concern", "Stable"),
                        ],
                    ),
                ],
            )],
        ),
        Node::root(
            "mammals",
            "Mammals",
            vec![Node::branch(
                "asia",
                "Asia",
                vec![Node::leaf(
                    "korea",
                    "Korea",
                    vec![
                        animal(16, "Korean Water Deer", "Wetlands", "Vulnerable", "Declining"),
                        animal(17, "Siberian Tiger", "Forests", "Endangered", "Declining"),
                    ],
                )],
            )],
        ),
    ])
}

/// Parameters for [`random_tree`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeShape {
    /// Number of top-level roots.
    pub roots: usize,
    /// Branch levels between a root and its leaves (at least 1).
    pub branch_depth: usize,
    /// Children per root or branch.
    pub fan_out: usize,
    /// Upper bound of items per leaf; leaves get `0..=max_items`.
    pub max_items: usize,
    /// Probability that an item starts out done.
    pub done_ratio: f64,
}

impl Default for TreeShape {
    fn default() -> Self {
        Self {
            roots: 2,
            branch_depth: 1,
            fan_out: 2,
            max_items: 4,
            done_ratio: 0.5,
        }
    }
}

const WORDS: &[&str] = &[
    "Amber", "Birch", "Cedar", "Delta", "Ember", "Fjord", "Grove", "Harbor", "Iris", "Juniper",
];

/// Generate a random tree of the given shape.
///
/// Ids repeat across parents (`b0`, `b1`, ... under every root) so the
/// result exercises path-based identity.
pub fn random_tree<R: Rng + ?Sized>(rng: &mut R, shape: TreeShape) -> Tree {
    let mut next_item = 1;
    let roots = (0..shape.roots)
        .map(|r| {
            let children = random_level(rng, &shape, shape.branch_depth.max(1), &mut next_item);
            Node::root(format!("r{}", r), random_name(rng, "Root"), children)
        })
        .collect();
    Tree::new(roots)
}

fn random_level<R: Rng + ?Sized>(
    rng: &mut R,
    shape: &TreeShape,
    branches_left: usize,
    next_item: &mut u64,
) -> Vec<Node> {
    (0..shape.fan_out)
        .map(|i| {
            if branches_left > 0 {
                let children = random_level(rng, shape, branches_left - 1, next_item);
                Node::branch(format!("b{}", i), random_name(rng, "Branch"), children)
            } else {
                let count = rng.random_range(0..=shape.max_items);
                let items = (0..count)
                    .map(|_| {
                        let id = *next_item;
                        *next_item += 1;
                        Item::new(id, random_name(rng, "Item"))
                            .with_attribute("note", format!("generated #{}", id))
                            .with_done(rng.random_bool(shape.done_ratio.clamp(0.0, 1.0)))
                    })
                    .collect();
                Node::leaf(format!("l{}", i), random_name(rng, "Leaf"), items)
            }
        })
        .collect()
}

fn random_name<R: Rng + ?Sized>(rng: &mut R, prefix: &str) -> String {
    let word = WORDS[rng.random_range(0..WORDS.len())];
    format!("{} {}", prefix, word)
}

/// Project types of the project views: (id, name).
pub const PROJECT_TYPES: &[(u32, &str)] = &[(1, "Ship"), (2, "Car"), (3, "Truck"), (4, "Train")];

/// Generate random projects, two to four per type, ordered by type and then
/// by descending priority.
pub fn projects<R: Rng + ?Sized>(rng: &mut R) -> Vec<Project> {
    let mut all = Vec::new();
    for (type_id, type_name) in PROJECT_TYPES {
        let count = rng.random_range(2..=4);
        let mut projects: Vec<Project> = (1..=count)
            .map(|i| random_project(rng, *type_id, type_name, i))
            .collect();
        projects.sort_by(|a, b| b.priority.cmp(&a.priority));
        all.extend(projects);
    }
    all
}

fn random_project<R: Rng + ?Sized>(rng: &mut R, type_id: u32, type_name: &str, index: usize) -> Project {
    let schedule: Vec<ScheduleStep> = (1..=SCHEDULE_STEPS)
        .map(|id| {
            let planned = rng.random_bool(0.7);
            let changed = planned && rng.random_bool(0.5);
            let completed = changed && rng.random_bool(0.5);
            ScheduleStep {
                id,
                planned,
                changed,
                completed,
                date: random_date(rng, 1..=12),
            }
        })
        .collect();
    let current_step = current_step_index(&schedule);
    let priority = Priority::from_level(rng.random_range(1..=3)).unwrap_or(Priority::Low);

    Project {
        id: format!("{}-{}", type_id, index),
        name: format!("{} Project {}", type_name, index),
        type_id,
        type_name: type_name.to_string(),
        priority,
        schedule,
        current_step,
        progress: rng.random_bool(0.8).then(|| rng.random_range(0..=100)),
        manager: format!("Manager {}", rng.random_range(1..=10)),
        budget: rng.random_range(1000..11000),
        start_date: random_date(rng, 1..=6),
        end_date: random_date(rng, 7..=12),
    }
}

fn random_date<R: Rng + ?Sized>(rng: &mut R, months: std::ops::RangeInclusive<u32>) -> NaiveDate {
    let month = rng.random_range(months);
    let day = rng.random_range(1..=28);
    NaiveDate::from_ymd_opt(2025, month, day).unwrap_or(NaiveDate::MIN)
}
