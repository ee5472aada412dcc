use katalog_core::{
    count_nodes, delete_by_id, delete_many_by_id, find_by_id, find_name_by_id, flatten,
    insert_as_child, list_parent_options, set_flag_for_ids, subtree_ids, take_by_id, update_by_id,
    would_create_cycle, Category, CategoryFlag, CategoryId, CategoryPatch,
};
use std::collections::HashSet;
use uuid::Uuid;

fn attach(parent: &mut Category, mut child: Category) -> CategoryId {
    child.parent_id = Some(parent.id);
    let id = child.id;
    parent.children.push(child);
    id
}

/// Two roots, one of them three levels deep:
/// Mesin Cuci > { Front Loading > 8-9kg, Top Loading }, Aksesoris.
fn demo_forest() -> (Vec<Category>, DemoIds) {
    let mut machines = Category::new("Mesin Cuci", "mesin-cuci");
    let mut front = Category::new("Front Loading", "front-loading");
    let capacity_id = attach(&mut front, Category::new("8-9kg", "8-9kg"));
    let front_id = attach(&mut machines, front);
    let top_id = attach(&mut machines, Category::new("Top Loading", "top-loading"));
    let accessories = Category::new("Aksesoris", "aksesoris");

    let ids = DemoIds {
        machines: machines.id,
        front: front_id,
        capacity: capacity_id,
        top: top_id,
        accessories: accessories.id,
    };
    (vec![machines, accessories], ids)
}

struct DemoIds {
    machines: CategoryId,
    front: CategoryId,
    capacity: CategoryId,
    top: CategoryId,
    accessories: CategoryId,
}

fn names(forest: &[Category]) -> Vec<(String, usize)> {
    flatten(forest)
        .into_iter()
        .map(|row| (row.category.name.clone(), row.depth))
        .collect()
}

#[test]
fn flatten_visits_every_node_exactly_once_in_pre_order() {
    let (forest, _ids) = demo_forest();

    let rows = flatten(&forest);
    assert_eq!(rows.len(), count_nodes(&forest));
    assert_eq!(rows.len(), 5);

    assert_eq!(
        names(&forest),
        vec![
            ("Mesin Cuci".to_string(), 0),
            ("Front Loading".to_string(), 1),
            ("8-9kg".to_string(), 2),
            ("Top Loading".to_string(), 1),
            ("Aksesoris".to_string(), 0),
        ]
    );

    let mut seen = HashSet::new();
    for row in &rows {
        assert!(seen.insert(row.category.id), "node visited twice");
    }
}

#[test]
fn insert_as_child_appends_last_and_round_trips_through_find() {
    let mut machines = Category::new("Mesin Cuci", "mesin-cuci");
    let front_id = attach(&mut machines, Category::new("Front Loading", "front-loading"));
    let forest = vec![machines];

    let capacity = Category::new("8-9kg", "8-9kg");
    let capacity_id = capacity.id;
    let next = insert_as_child(&forest, front_id, capacity.clone()).unwrap();

    let found = find_by_id(&next, capacity_id).unwrap();
    assert_eq!(found.parent_id, Some(front_id));
    assert_eq!(found.name, capacity.name);
    assert_eq!(found.slug, capacity.slug);

    assert_eq!(
        names(&next),
        vec![
            ("Mesin Cuci".to_string(), 0),
            ("Front Loading".to_string(), 1),
            ("8-9kg".to_string(), 2),
        ]
    );

    // Input forest is untouched.
    assert_eq!(count_nodes(&forest), 2);
}

#[test]
fn insert_as_child_reports_missing_parent() {
    let (forest, _ids) = demo_forest();
    let orphan = Category::new("Pengering", "pengering");
    assert!(insert_as_child(&forest, Uuid::new_v4(), orphan).is_none());
}

#[test]
fn find_helpers_resolve_nested_nodes_and_report_misses() {
    let (forest, ids) = demo_forest();

    assert_eq!(find_name_by_id(&forest, ids.capacity), Some("8-9kg"));
    assert_eq!(find_name_by_id(&forest, ids.accessories), Some("Aksesoris"));
    assert_eq!(find_name_by_id(&forest, Uuid::new_v4()), None);
    assert!(find_by_id(&forest, Uuid::new_v4()).is_none());
}

#[test]
fn delete_by_id_prunes_the_whole_subtree() {
    let (forest, ids) = demo_forest();

    let next = delete_by_id(&forest, ids.machines).unwrap();

    assert!(find_by_id(&next, ids.machines).is_none());
    assert!(find_by_id(&next, ids.front).is_none());
    assert!(find_by_id(&next, ids.capacity).is_none());
    assert!(find_by_id(&next, ids.top).is_none());
    assert_eq!(count_nodes(&next), 1);
    assert_eq!(next[0].name, "Aksesoris");

    assert!(delete_by_id(&forest, Uuid::new_v4()).is_none());
}

#[test]
fn delete_many_by_id_removes_listed_nodes_at_any_depth() {
    let (forest, ids) = demo_forest();
    let targets: HashSet<_> = [ids.capacity, ids.accessories].into_iter().collect();

    let (next, removed) = delete_many_by_id(&forest, &targets);

    assert_eq!(removed, 2);
    assert!(find_by_id(&next, ids.capacity).is_none());
    assert!(find_by_id(&next, ids.accessories).is_none());
    assert!(find_by_id(&next, ids.front).is_some());
    assert_eq!(count_nodes(&next), 3);
}

#[test]
fn update_by_id_changes_only_the_targeted_node() {
    let (forest, ids) = demo_forest();
    let patch = CategoryPatch {
        is_active: Some(false),
        ..CategoryPatch::default()
    };

    let next = update_by_id(&forest, ids.front, &patch).unwrap();

    for row in flatten(&next) {
        let original = find_by_id(&forest, row.category.id).unwrap();
        if row.category.id == ids.front {
            assert!(!row.category.is_active);
            assert_eq!(row.category.children, original.children);
        } else {
            let mut expected = original.clone();
            // The targeted node sits inside some other node's children;
            // compare everything else field-by-field via deep equality.
            if row.category.id == ids.machines {
                expected.children = next[0].children.clone();
            }
            assert_eq!(row.category, &expected);
        }
    }

    assert!(update_by_id(&forest, Uuid::new_v4(), &patch).is_none());
}

#[test]
fn set_flag_for_ids_is_idempotent_and_isolated() {
    let (forest, ids) = demo_forest();
    let targets: HashSet<_> = [ids.front].into_iter().collect();

    let (once, updated_once) =
        set_flag_for_ids(&forest, &targets, CategoryFlag::Featured, true);
    let (twice, updated_twice) =
        set_flag_for_ids(&once, &targets, CategoryFlag::Featured, true);

    assert_eq!(updated_once, 1);
    assert_eq!(updated_twice, 1);
    assert_eq!(once, twice);

    assert!(find_by_id(&once, ids.front).unwrap().is_featured);
    assert!(!find_by_id(&once, ids.machines).unwrap().is_featured);
    assert!(!find_by_id(&once, ids.capacity).unwrap().is_featured);
}

#[test]
fn set_flag_for_ids_toggles_active_without_touching_parents() {
    let (forest, ids) = demo_forest();
    let targets: HashSet<_> = [ids.front].into_iter().collect();

    let (next, _updated) = set_flag_for_ids(&forest, &targets, CategoryFlag::Active, false);

    assert!(!find_by_id(&next, ids.front).unwrap().is_active);
    assert!(find_by_id(&next, ids.machines).unwrap().is_active);
}

#[test]
fn take_by_id_detaches_the_subtree_intact() {
    let (forest, ids) = demo_forest();

    let (pruned, detached) = take_by_id(&forest, ids.front).unwrap();

    assert_eq!(detached.id, ids.front);
    assert_eq!(detached.children.len(), 1);
    assert_eq!(detached.children[0].id, ids.capacity);
    assert!(find_by_id(&pruned, ids.front).is_none());
    assert_eq!(count_nodes(&pruned), 3);
}

#[test]
fn subtree_ids_lists_node_and_descendants_pre_order() {
    let (forest, ids) = demo_forest();
    let machines = find_by_id(&forest, ids.machines).unwrap();

    assert_eq!(
        subtree_ids(machines),
        vec![ids.machines, ids.front, ids.capacity, ids.top]
    );
}

#[test]
fn parent_options_skip_the_excluded_node_and_its_descendants() {
    let (forest, ids) = demo_forest();

    let all = list_parent_options(&forest, None);
    assert_eq!(all.len(), 5);
    assert_eq!(all[0].depth, 0);
    assert_eq!(all[2].name, "8-9kg");
    assert_eq!(all[2].depth, 2);

    let without_front = list_parent_options(&forest, Some(ids.front));
    let option_ids: Vec<_> = without_front.iter().map(|option| option.id).collect();
    assert!(!option_ids.contains(&ids.front));
    assert!(!option_ids.contains(&ids.capacity));
    assert!(option_ids.contains(&ids.machines));
    assert!(option_ids.contains(&ids.top));
    assert!(option_ids.contains(&ids.accessories));
}

#[test]
fn would_create_cycle_flags_self_and_descendants_only() {
    let (forest, ids) = demo_forest();

    assert!(would_create_cycle(&forest, ids.machines, ids.machines));
    assert!(would_create_cycle(&forest, ids.machines, ids.front));
    assert!(would_create_cycle(&forest, ids.machines, ids.capacity));
    assert!(would_create_cycle(&forest, ids.front, ids.capacity));

    assert!(!would_create_cycle(&forest, ids.front, ids.top));
    assert!(!would_create_cycle(&forest, ids.machines, ids.accessories));
    assert!(!would_create_cycle(&forest, ids.capacity, ids.front));
    assert!(!would_create_cycle(&forest, Uuid::new_v4(), ids.machines));
}
