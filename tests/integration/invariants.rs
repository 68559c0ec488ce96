//! Property tests over random operation sequences on one tree

use deskfs::store::UserData;
use deskfs::tree::node::NodeKind;
use deskfs::tree::FileTree;
use proptest::prelude::*;
use std::collections::HashSet;

#[derive(Debug, Clone)]
enum Op {
    Mkdir(usize, String),
    Touch(usize, String),
    Write(usize, String, String),
    SetUrl(usize, String, String),
    Rm(usize, String),
    Rmdir(usize, String),
    Rename(usize, String, String),
    Move(usize, String, usize),
}

fn name() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["a", "b", "c", "d"]).prop_map(String::from)
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any::<usize>(), name()).prop_map(|(d, n)| Op::Mkdir(d, n)),
        (any::<usize>(), name()).prop_map(|(d, n)| Op::Touch(d, n)),
        (any::<usize>(), name(), "[a-z ]{0,12}").prop_map(|(d, n, c)| Op::Write(d, n, c)),
        (any::<usize>(), name(), "[a-z]{1,8}")
            .prop_map(|(d, n, host)| Op::SetUrl(d, n, format!("https://{}.com", host))),
        (any::<usize>(), name()).prop_map(|(d, n)| Op::Rm(d, n)),
        (any::<usize>(), name()).prop_map(|(d, n)| Op::Rmdir(d, n)),
        (any::<usize>(), name(), name()).prop_map(|(d, a, b)| Op::Rename(d, a, b)),
        (any::<usize>(), name(), any::<usize>()).prop_map(|(d, n, t)| Op::Move(d, n, t)),
    ]
}

/// Full paths of all directories, home first
fn directories(tree: &FileTree) -> Vec<String> {
    let mut dirs: Vec<String> = tree
        .nodes()
        .filter(|n| n.is_dir())
        .map(|n| tree.full_path(n.id))
        .collect();
    dirs.push(tree.home());
    dirs.sort();
    dirs
}

fn apply(tree: &mut FileTree, op: &Op) {
    let dirs = directories(tree);
    let at = |i: usize| dirs[i % dirs.len()].clone();
    // Failures are expected outcomes; only the invariants matter here.
    let _ = match op {
        Op::Mkdir(d, n) => tree.create(&at(*d), n, NodeKind::Directory).map(|_| ()),
        Op::Touch(d, n) => tree.create(&at(*d), n, NodeKind::File).map(|_| ()),
        Op::Write(d, n, c) => tree.set_content(&at(*d), n, c),
        Op::SetUrl(d, n, u) => tree.set_url(&at(*d), n, u).map(|_| ()),
        Op::Rm(d, n) => tree.remove(&at(*d), n, NodeKind::File).map(|_| ()),
        Op::Rmdir(d, n) => tree.remove(&at(*d), n, NodeKind::Directory).map(|_| ()),
        Op::Rename(d, a, b) => tree.rename(&at(*d), a, b),
        Op::Move(d, n, t) => tree.move_node(&at(*d), n, &at(*t)).map(|_| ()),
    };
}

fn pairs(data: &UserData) -> Vec<(String, String)> {
    data.directories
        .iter()
        .map(|d| (d.location.clone(), d.name.clone()))
        .chain(data.files.iter().map(|f| (f.location.clone(), f.name.clone())))
        .chain(data.urls.iter().map(|u| (u.location.clone(), u.name.clone())))
        .collect()
}

proptest! {
    #[test]
    fn names_stay_unique_per_location(ops in prop::collection::vec(op(), 1..60)) {
        let mut tree = FileTree::new("alice");
        for op in &ops {
            apply(&mut tree, op);
            let all = pairs(&tree.to_records());
            let unique: HashSet<_> = all.iter().cloned().collect();
            prop_assert_eq!(all.len(), unique.len());
        }
    }

    #[test]
    fn directory_sizes_stay_additive(ops in prop::collection::vec(op(), 1..60)) {
        let mut tree = FileTree::new("alice");
        for op in &ops {
            apply(&mut tree, op);
            prop_assert!(tree.verify_sizes().is_empty(), "after {:?}: {:?}", op, tree.verify_sizes());
        }

        // Sizes also hold when read back from the flat records
        let data = tree.to_records();
        for dir in &data.directories {
            let path = format!("{}/{}", dir.location, dir.name);
            let expected: u64 = data.directories.iter().filter(|d| d.location == path).map(|d| d.size)
                .chain(data.files.iter().filter(|f| f.location == path).map(|f| f.size))
                .chain(data.urls.iter().filter(|u| u.location == path).map(|u| u.size))
                .sum();
            prop_assert_eq!(dir.size, expected);
        }
    }

    #[test]
    fn rename_rewrites_only_descendant_locations(
        ops in prop::collection::vec(op(), 1..40),
        new_name in "[e-h]{1,3}",
    ) {
        let mut tree = FileTree::new("alice");
        tree.create("/alice", "target", NodeKind::Directory).unwrap();
        tree.create("/alice", "targetx", NodeKind::Directory).unwrap();
        tree.create("/alice/targetx", "keep", NodeKind::File).unwrap();
        for op in &ops {
            apply(&mut tree, op);
        }
        prop_assume!(tree.lookup_path("/alice/target").is_some());
        prop_assume!(tree.lookup_path(&format!("/alice/{}", new_name)).is_none());

        let before = pairs(&tree.to_records());
        tree.rename("/alice", "target", &new_name).unwrap();
        let after: HashSet<_> = pairs(&tree.to_records()).into_iter().collect();

        let old_prefix = "/alice/target";
        let new_prefix = format!("/alice/{}", new_name);
        for (location, name) in before {
            let moved = if location == old_prefix || location.starts_with("/alice/target/") {
                (format!("{}{}", new_prefix, &location[old_prefix.len()..]), name)
            } else if location == "/alice" && name == "target" {
                (location, new_name.clone())
            } else {
                (location, name)
            };
            prop_assert!(after.contains(&moved), "missing {:?}", moved);
        }
    }
}

#[test]
fn rename_leaves_prefix_sibling_alone() {
    let mut tree = FileTree::new("alice");
    tree.create("/alice", "a", NodeKind::Directory).unwrap();
    tree.create("/alice", "ab", NodeKind::Directory).unwrap();
    tree.create("/alice/a", "x", NodeKind::File).unwrap();
    tree.create("/alice/ab", "y", NodeKind::File).unwrap();

    tree.rename("/alice", "a", "z").unwrap();

    let data = tree.to_records();
    let file = |name: &str| data.files.iter().find(|f| f.name == name).unwrap().location.clone();
    assert_eq!(file("x"), "/alice/z");
    assert_eq!(file("y"), "/alice/ab");
}
