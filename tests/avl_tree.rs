use avl_index::{
    tree_base::Node, AvlTree, OrdComparator, Reversed, RotationCases, UnbalancedTree,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn build(keys: &[i32]) -> AvlTree<i32> {
    let mut tree = AvlTree::new();
    tree.set_self_verify(true);
    for &k in keys {
        tree.insert(k);
    }
    tree
}

fn child(node: &Node<i32>, left: bool) -> Option<&Node<i32>> {
    if left {
        node.left.as_deref()
    } else {
        node.right.as_deref()
    }
}

/// Render a subtree as `root(left,right)` with `-` for an absent child.
fn shape(link: Option<&Node<i32>>) -> String {
    match link {
        None => "-".to_string(),
        Some(n) if n.is_leaf() => n.record.to_string(),
        Some(n) => format!(
            "{}({},{})",
            n.record,
            shape(child(n, true)),
            shape(child(n, false))
        ),
    }
}

#[test]
fn balanced_insert_order_needs_no_rotation() {
    init_logger();
    let mut tree = AvlTree::new();
    let mut rotations = 0;
    let mut comparisons = Vec::new();
    for k in [5, 3, 8, 1, 4, 7, 9] {
        let out = tree.insert(k);
        assert!(out.value);
        rotations += out.rotations();
        comparisons.push(out.comparisons());
    }

    assert_eq!(rotations, 0);
    assert_eq!(comparisons, vec![0, 1, 1, 2, 2, 2, 2]);
    assert_eq!(tree.in_order(), vec![&1, &3, &4, &5, &7, &8, &9]);
    assert_eq!(tree.root(), Some(&5));
    assert_eq!(shape(tree.root_node()), "5(3(1,4),8(7,9))");
    assert_eq!(tree.height(), 3);
    assert_eq!(tree.verify(), Ok(()));
}

#[test]
fn ascending_inserts_rotate_left() {
    init_logger();
    let mut tree = AvlTree::new();

    assert_eq!(tree.insert(1).rotations(), 0);
    assert_eq!(tree.insert(2).rotations(), 0);

    let third = tree.insert(3);
    assert!(third.stats.has(RotationCases::RightRight));
    assert_eq!(shape(tree.root_node()), "2(1,3)");

    tree.insert(4);
    let fifth = tree.insert(5);
    assert!(fifth.stats.has(RotationCases::RightRight));
    assert_eq!(fifth.rotations(), 1);

    assert_eq!(shape(tree.root_node()), "2(1,4(3,5))");
    assert_eq!(tree.height(), 3);
    assert_eq!(tree.verify(), Ok(()));
}

#[test]
fn descending_inserts_rotate_right() {
    let tree = build(&[5, 4, 3, 2, 1]);
    assert_eq!(shape(tree.root_node()), "4(2(1,3),5)");
    assert_eq!(tree.height(), 3);
}

#[test]
fn zigzag_inserts_double_rotate() {
    let mut tree = AvlTree::new();
    tree.insert(30);
    tree.insert(10);
    let lr = tree.insert(20);
    assert!(lr.stats.has(RotationCases::LeftRight));
    assert_eq!(lr.rotations(), 2);
    assert_eq!(shape(tree.root_node()), "20(10,30)");

    let mut tree = AvlTree::new();
    tree.insert(10);
    tree.insert(30);
    let rl = tree.insert(20);
    assert!(rl.stats.has(RotationCases::RightLeft));
    assert_eq!(shape(tree.root_node()), "20(10,30)");
}

#[test]
fn miss_costs_at_most_the_height() {
    let tree = build(&[10, 20, 30]);
    assert_eq!(tree.height(), 2);

    let miss = tree.search(&25);
    assert!(!miss.value);
    assert_eq!(miss.comparisons(), 2);
    assert!(miss.comparisons() <= tree.height() as u64);

    let hit = tree.search(&20);
    assert!(hit.value);
    assert_eq!(hit.comparisons(), 1);
}

#[test]
fn remove_two_children_takes_successor() {
    init_logger();
    let mut tree = build(&[5, 3, 8, 1, 4, 7, 9]);

    let out = tree.remove(&5);
    assert_eq!(out.value, Some(5));
    // one comparison at the root, then 8 and 7 on the way to the successor
    assert_eq!(out.comparisons(), 3);
    assert_eq!(out.rotations(), 0);

    assert_eq!(tree.root(), Some(&7));
    assert_eq!(shape(tree.root_node()), "7(3(1,4),8(-,9))");
    assert_eq!(tree.in_order(), vec![&1, &3, &4, &7, &8, &9]);
    assert!(!tree.search(&5).value);
    assert_eq!(tree.len(), 6);
}

#[test]
fn remove_single_child_splices() {
    let mut tree = build(&[5, 3, 8, 9]);
    let out = tree.remove(&8);
    assert_eq!(out.value, Some(8));
    assert_eq!(shape(tree.root_node()), "5(3,9)");
}

#[test]
fn remove_everything_empties_the_tree() {
    let mut tree = build(&(0..64).collect::<Vec<_>>());
    for k in (0..64).rev().step_by(3).chain((0..64).filter(|k| (63 - k) % 3 != 0)) {
        assert_eq!(tree.remove(&k).value, Some(k));
    }
    assert!(tree.is_empty());
    assert!(tree.root_node().is_none());
    assert_eq!(tree.stats().size, 0);
}

#[test]
fn iteration_is_restartable() {
    let tree = build(&[4, 2, 6, 1, 3, 5, 7]);
    let first: Vec<_> = tree.iter().copied().collect();
    let second: Vec<_> = (&tree).into_iter().copied().collect();
    assert_eq!(first, second);
    assert_eq!(tree.iter().len(), 7);
    assert_eq!(tree.len(), 7);
}

#[test]
fn reversed_comparator_sorts_descending() {
    let mut tree = AvlTree::<i32, _>::with_comparator(Reversed(OrdComparator::new()));
    for k in [3, 1, 2, 5, 4] {
        tree.insert(k);
    }
    assert_eq!(tree.into_sorted_vec(), vec![5, 4, 3, 2, 1]);
}

#[derive(Clone, Debug, PartialEq)]
struct Student {
    id: u32,
    name: &'static str,
    korean: u32,
    english: u32,
    math: u32,
}

impl Student {
    fn new(id: u32, name: &'static str, korean: u32, english: u32, math: u32) -> Self {
        Self {
            id,
            name,
            korean,
            english,
            math,
        }
    }

    fn total(&self) -> u32 {
        self.korean + self.english + self.math
    }
}

fn roster() -> Vec<Student> {
    vec![
        Student::new(2024003, "Seo", 90, 80, 70),
        Student::new(2024001, "Kim", 70, 80, 90),
        Student::new(2024005, "Lee", 90, 90, 90),
        Student::new(2024002, "Park", 80, 80, 80),
        Student::new(2024004, "Choi", 60, 70, 80),
    ]
}

#[test]
fn student_index_by_id() {
    let mut index = AvlTree::with_comparator(|a: &Student, b: &Student| a.id.cmp(&b.id));
    for s in roster() {
        assert!(index.insert(s).value);
    }

    let found = index.get_with(|s| 2024002_u32.cmp(&s.id));
    assert_eq!(found.value.map(|s| s.name), Some("Park"));
    assert!(found.comparisons() <= index.height() as u64);

    let gone = index.remove_with(|s| 2024003_u32.cmp(&s.id));
    assert_eq!(gone.value.map(|s| s.name), Some("Seo"));
    assert!(!index.search_with(|s| 2024003_u32.cmp(&s.id)).value);

    let ids: Vec<_> = index.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![2024001, 2024002, 2024004, 2024005]);
}

#[test]
fn student_index_by_grade_tuple() {
    // total first, then korean, english, math to break ties
    let by_grade = |a: &Student, b: &Student| {
        a.total()
            .cmp(&b.total())
            .then(a.korean.cmp(&b.korean))
            .then(a.english.cmp(&b.english))
            .then(a.math.cmp(&b.math))
    };
    let mut index = AvlTree::with_comparator(Reversed(by_grade));
    for s in roster() {
        index.insert(s);
    }

    let names: Vec<_> = index.iter().map(|s| s.name).collect();
    assert_eq!(names, vec!["Lee", "Seo", "Park", "Kim", "Choi"]);
}

#[test]
fn equal_keys_under_the_order_are_suppressed() {
    let mut index = AvlTree::with_comparator(|a: &Student, b: &Student| a.name.len().cmp(&b.name.len()));
    let mut kept = 0;
    for s in roster() {
        if index.insert(s).value {
            kept += 1;
        }
    }
    // "Seo", "Kim", "Lee" share a length, as do "Park" and "Choi"
    assert_eq!(kept, 2);
    assert_eq!(index.len(), 2);
    assert_eq!(index.iter().map(|s| s.name).collect::<Vec<_>>(), vec!["Seo", "Park"]);
}

#[test]
fn unbalanced_tree_degenerates_on_sorted_input() {
    let mut avl = AvlTree::new();
    let mut plain = UnbalancedTree::new();
    for k in 0..1000 {
        avl.insert(k);
        plain.insert(k);
    }

    assert_eq!(plain.height(), 1000);
    assert!(avl.height() <= 11);

    let probe = 999;
    assert_eq!(plain.search(&probe).comparisons(), 1000);
    assert!(avl.search(&probe).comparisons() <= avl.height() as u64);

    assert_eq!(plain.in_order(), avl.in_order());
    assert_eq!(plain.verify(), Ok(()));
    assert_eq!(avl.verify(), Ok(()));
}

#[test]
fn unbalanced_tree_matches_avl_contents_on_random_order() {
    use rand::{seq::SliceRandom, thread_rng};

    let mut keys: Vec<i32> = (0..500).collect();
    keys.shuffle(&mut thread_rng());

    let mut avl = AvlTree::new();
    let mut plain = UnbalancedTree::new();
    for &k in &keys {
        avl.insert(k);
        plain.insert(k);
    }
    for &k in keys.iter().take(200) {
        assert_eq!(avl.remove(&k).value, plain.remove(&k).value);
    }

    assert_eq!(avl.in_order(), plain.in_order());
    // 300 records: an AVL tree cannot exceed 1.44 * log2(302)
    assert!(avl.height() <= 11);
    assert_eq!(avl.stats().removals, 200);
    assert_eq!(plain.stats().rotations, 0);
    assert_eq!(
        avl.search_with(|r| 250_i32.cmp(r)).value,
        plain.search_with(|r| 250_i32.cmp(r)).value
    );
}

#[test]
fn locator_sees_records_on_the_search_path_only() {
    let tree = build(&[5, 3, 8, 1, 4, 7, 9]);
    let mut seen = Vec::new();
    let out = tree.search_with(|r| {
        seen.push(*r);
        4_i32.cmp(r)
    });
    assert!(out.value);
    assert_eq!(seen, vec![5, 3, 4]);
    assert_eq!(out.comparisons(), 3);
}

#[test]
fn unbalanced_tree_takes_a_long_sorted_run() {
    let n = 20_000;
    let mut plain = UnbalancedTree::new();
    for k in 0..n {
        plain.insert(k);
    }
    assert_eq!(plain.height(), n as usize);
    assert_eq!(plain.search(&(n - 1)).comparisons(), n as u64);
    assert_eq!(plain.verify(), Ok(()));

    // the deepest node has no children; its parent has one
    assert_eq!(plain.remove(&(n - 1)).value, Some(n - 1));
    assert_eq!(plain.remove(&(n - 3)).value, Some(n - 3));
    assert_eq!(plain.height(), n as usize - 2);
    assert_eq!(plain.len(), n as usize - 2);
    drop(plain);
}

#[test]
fn panicking_comparator_leaves_tree_intact() {
    use std::panic::{catch_unwind, AssertUnwindSafe};

    let mut tree = AvlTree::with_comparator(|a: &i32, b: &i32| {
        if *a == 13 || *b == 13 {
            panic!("13 is not comparable");
        }
        a.cmp(b)
    });
    for k in [5, 3, 8, 1, 4, 7, 9] {
        tree.insert(k);
    }

    let inserted = catch_unwind(AssertUnwindSafe(|| tree.insert(13)));
    assert!(inserted.is_err());
    let removed = catch_unwind(AssertUnwindSafe(|| {
        tree.remove_with(|r| if *r == 4 { panic!("stop at 4") } else { 4_i32.cmp(r) })
    }));
    assert!(removed.is_err());

    assert_eq!(tree.len(), 7);
    assert_eq!(tree.verify(), Ok(()));
    assert_eq!(tree.into_sorted_vec(), vec![1, 3, 4, 5, 7, 8, 9]);
}

#[test]
fn reported_counts_match_comparator_calls() {
    use std::cell::Cell;

    use rand::{seq::SliceRandom, thread_rng};

    let calls = Cell::new(0_u64);
    let mut tree = AvlTree::with_comparator(|a: &i32, b: &i32| {
        calls.set(calls.get() + 1);
        a.cmp(b)
    });

    let mut keys: Vec<i32> = (0..300).collect();
    keys.shuffle(&mut thread_rng());
    for &k in keys.iter().chain(keys.iter().take(50)) {
        let before = calls.get();
        let out = tree.insert(k);
        assert_eq!(out.comparisons(), calls.get() - before);
    }

    keys.shuffle(&mut thread_rng());
    for &k in keys.iter().take(150) {
        let path = tree.search(&k).comparisons();
        let before = calls.get();
        let out = tree.remove(&k);
        // the comparator runs only on the search path; a successor descent
        // is counted on top of that without consulting it
        assert_eq!(calls.get() - before, path);
        assert!(out.comparisons() >= path);
        assert_eq!(out.value, Some(k));
    }

    let before = calls.get();
    let miss = tree.remove(&1000);
    assert_eq!(miss.comparisons(), calls.get() - before);
    assert!(miss.comparisons() as usize <= tree.height());
}

#[test]
fn successor_descent_is_counted_without_calling_the_comparator() {
    use std::cell::Cell;

    let calls = Cell::new(0_u64);
    let mut tree = AvlTree::with_comparator(|a: &i32, b: &i32| {
        calls.set(calls.get() + 1);
        a.cmp(b)
    });
    for k in [5, 3, 8, 1, 4, 7, 9] {
        tree.insert(k);
    }

    let before = calls.get();
    let out = tree.remove(&5);
    assert_eq!(calls.get() - before, 1);
    assert_eq!(out.comparisons(), 3);
    assert_eq!(out.into_inner(), Some(5));
}

#[test]
fn key_comp_is_the_injected_order() {
    use std::cmp::Ordering;

    use avl_index::KeyComparator;

    let tree = AvlTree::<i32, _>::with_comparator(Reversed(OrdComparator::new()));
    assert_eq!(tree.key_comp().compare(&1, &2), Ordering::Greater);
    assert_eq!(tree.key_comp().0.compare(&1, &2), Ordering::Less);
}
