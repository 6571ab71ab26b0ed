//! Graph translation over nested, shared and cyclic objects.

use std::sync::Arc;

use ntest::timeout;

use dict_trans_core::{shared, FieldOverrides, TranslationEngine};

use super::helpers::{sample_cache, Address, User};

fn engine() -> TranslationEngine {
    TranslationEngine::new(Arc::new(sample_cache()))
}

#[test]
fn test_graph_translates_nested_objects() {
    let friend = shared(User {
        address: Some(Address {
            city: "SH".to_string(),
            ..Default::default()
        }),
        ..User::new("F")
    });
    let mut user = User {
        address: Some(Address {
            city: "BJ".to_string(),
            ..Default::default()
        }),
        friends: vec![Arc::clone(&friend)],
        ..User::new("M")
    };

    let stats = engine().translate_graph(&mut user, None);

    assert_eq!(user.gender, "Male");
    assert_eq!(user.address.as_ref().unwrap().city, "Beijing");
    assert_eq!(friend.read().gender, "Female");
    assert_eq!(friend.read().address.as_ref().unwrap().city, "Shanghai");
    assert_eq!(stats.objects, 4);
}

#[timeout(5000)]
#[test]
fn test_two_node_cycle_terminates() {
    let a = shared(User::new("M"));
    let b = shared(User::new("F"));
    a.write().friends.push(Arc::clone(&b));
    b.write().friends.push(Arc::clone(&a));

    let stats = engine().translate_graph_shared(&a, None);

    assert_eq!(a.read().gender, "Male");
    assert_eq!(b.read().gender, "Female");
    assert_eq!(stats.objects, 2);

    a.write().friends.clear();
}

#[timeout(5000)]
#[test]
fn test_self_reference_terminates() {
    let a = shared(User::new("F"));
    a.write().friends.push(Arc::clone(&a));

    let stats = engine().translate_graph_shared(&a, None);

    assert_eq!(a.read().gender, "Female");
    assert_eq!(stats.objects, 1);

    a.write().friends.clear();
}

#[timeout(5000)]
#[test]
fn test_shared_nodes_reached_by_several_paths() {
    let leaf = shared(User::new("M"));
    let hub = shared(User {
        friends: vec![Arc::clone(&leaf)],
        ..User::new("F")
    });
    leaf.write().friends.push(Arc::clone(&hub));
    let mut root = User {
        friends: vec![Arc::clone(&hub), Arc::clone(&leaf)],
        ..User::new("M")
    };

    let stats = engine().translate_graph(&mut root, None);

    assert_eq!(root.gender, "Male");
    assert_eq!(hub.read().gender, "Female");
    assert_eq!(leaf.read().gender, "Male");
    assert_eq!(stats.objects, 3);

    leaf.write().friends.clear();
}

#[test]
fn test_overrides_apply_across_graph() {
    let friend = shared(User::new("M"));
    let mut user = User {
        friends: vec![Arc::clone(&friend)],
        ..User::new("M")
    };
    let overrides = FieldOverrides::new().with("gender", "gender_short");

    engine().translate_graph(&mut user, Some(&overrides));

    assert_eq!(user.gender, "m");
    assert_eq!(friend.read().gender, "m");
}

#[test]
fn test_graph_list_translates_each_element() {
    let mut users = vec![
        User {
            address: Some(Address {
                city: "BJ".to_string(),
                ..Default::default()
            }),
            ..User::new("M")
        },
        User::new("F"),
    ];

    let stats = engine().translate_graph_list(&mut users, None);

    assert_eq!(users[0].address.as_ref().unwrap().city, "Beijing");
    assert_eq!(users[1].gender, "Female");
    assert_eq!(stats.objects, 3);
}
