/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use super::*;
use pretty_assertions::assert_eq;
use static_assertions::assert_impl_all;

assert_impl_all!(List<i32>: Send, Sync);

mod iter {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_iter() {
        let limit = 1024;
        let mut list = List::new();

        for i in 0..limit {
            list.push_back(i);
        }

        let mut expected = 0;

        for &v in list.iter() {
            assert_eq!(v, expected);
            expected += 1;
        }

        assert_eq!(expected, limit);
    }

    #[test]
    fn test_iter_empty() {
        let list: List<i32> = List::new();

        assert_eq!(list.iter().next(), None);
    }

    #[test]
    fn test_iter_size_hint() {
        let list = list![0, 1, 2];
        let mut iterator = list.iter();

        assert_eq!(iterator.size_hint(), (3, Some(3)));

        iterator.next();

        assert_eq!(iterator.size_hint(), (2, Some(2)));

        iterator.next();

        assert_eq!(iterator.size_hint(), (1, Some(1)));

        iterator.next();

        assert_eq!(iterator.size_hint(), (0, Some(0)));
    }

    #[test]
    fn test_into_iterator() {
        let list = list![0, 1, 2, 3];
        let mut expected = 0;

        for &v in &list {
            assert_eq!(v, expected);
            expected += 1;
        }

        assert_eq!(expected, 4);
    }
}

mod internal {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_freed_slots_are_reused() {
        let mut list = list!["a", "b", "c"];
        let slot_count = list.slots.len();

        list.pop_back();
        list.push_back("d");

        assert_eq!(list.slots.len(), slot_count);
        assert_eq!(list, list!["a", "b", "d"]);
    }

    #[test]
    fn test_links_after_middle_removal() {
        let mut list = List::new();

        let _a = list.push_back(0);
        let b = list.push_back(1);
        let c = list.push_back(2);

        list.remove(b);

        let head = list.head.unwrap();
        assert_eq!(list.node(head).next, Some(c));
        assert_eq!(list.node(c).prev, Some(head));
        assert_eq!(list.tail, Some(c));
    }
}

#[test]
fn test_push_front() {
    let mut list = List::new();

    list.push_front(2);
    list.push_front(1);
    list.push_front(0);

    assert_eq!(list.len(), 3);
    assert_eq!(list.first(), Some(&0));
    assert_eq!(list.last(), Some(&2));
    assert_eq!(list, list![0, 1, 2]);
}

#[test]
fn test_push_back() {
    let mut list = List::new();

    list.push_back(0);
    list.push_back(1);
    list.push_back(2);

    assert_eq!(list.len(), 3);
    assert_eq!(list.first(), Some(&0));
    assert_eq!(list.last(), Some(&2));
    assert_eq!(list, list![0, 1, 2]);
}

#[test]
fn test_pop_front() {
    let mut list = list![0, 1, 2];

    assert_eq!(list.pop_front(), Some(0));
    assert_eq!(list.pop_front(), Some(1));
    assert_eq!(list.pop_front(), Some(2));
    assert_eq!(list.pop_front(), None);
    assert!(list.is_empty());
}

#[test]
fn test_pop_back() {
    let mut list = list![0, 1, 2];

    assert_eq!(list.pop_back(), Some(2));
    assert_eq!(list.pop_back(), Some(1));
    assert_eq!(list.pop_back(), Some(0));
    assert_eq!(list.pop_back(), None);
    assert!(list.is_empty());
}

#[test]
fn test_remove() {
    let mut list = List::new();

    let _a = list.push_back("a");
    let b = list.push_back("b");
    let _c = list.push_back("c");

    assert_eq!(list.remove(b), "b");
    assert_eq!(list.len(), 2);
    assert_eq!(list, list!["a", "c"]);
}

#[test]
fn test_remove_only_element() {
    let mut list = List::new();
    let id = list.push_back(7);

    assert_eq!(list.remove(id), 7);
    assert!(list.is_empty());
    assert_eq!(list.first(), None);
    assert_eq!(list.last(), None);
}

#[test]
#[should_panic(expected = "list node id is not live")]
fn test_remove_stale_handle_panics() {
    let mut list = List::new();
    let id = list.push_back(0);

    list.remove(id);
    list.remove(id);
}

#[test]
fn test_get() {
    let mut list = List::new();

    let a = list.push_back("a");
    let b = list.push_back("b");

    assert_eq!(list.get(a), Some(&"a"));
    assert_eq!(list.get(b), Some(&"b"));

    list.remove(a);

    assert_eq!(list.get(a), None);
    assert_eq!(list.get(b), Some(&"b"));
}

#[test]
fn test_get_mut() {
    let mut list = List::new();
    let a = list.push_back(1);

    *list.get_mut(a).unwrap() = 10;

    assert_eq!(list.get(a), Some(&10));
}

#[test]
fn test_node_walk() {
    let list = list![0, 1, 2];
    let mut walked = Vec::new();
    let mut current = list.first_node();

    while let Some(id) = current {
        walked.push(*list.get(id).unwrap());
        current = list.next_node(id);
    }

    assert_eq!(walked, vec![0, 1, 2]);

    let last = list.last_node().unwrap();
    assert_eq!(list.previous_node(last), Some(list.next_node(list.first_node().unwrap()).unwrap()));
}

#[test]
fn test_macro_list() {
    let mut list_1 = List::new();
    list_1.push_back(1);

    let mut list_1_2_3 = List::new();
    list_1_2_3.push_back(1);
    list_1_2_3.push_back(2);
    list_1_2_3.push_back(3);

    assert_eq!(List::<u32>::new(), list![]);
    assert_eq!(list_1, list![1]);
    assert_eq!(list_1_2_3, list![1, 2, 3]);
}

#[test]
fn test_from_iterator() {
    let vec: Vec<u32> = vec![10, 11, 12];
    let list: List<u32> = vec.iter().copied().collect();

    assert_eq!(list, list![10, 11, 12]);
}

#[test]
fn test_default() {
    let list: List<i32> = List::default();

    assert_eq!(list.len(), 0);
    assert!(list.is_empty());
}

#[test]
fn test_display() {
    let empty_list: List<i32> = List::new();
    let list = list![0, 1, 2];

    assert_eq!(format!("{}", empty_list), "[]");
    assert_eq!(format!("{}", list), "[0, 1, 2]");
}

#[test]
fn test_eq() {
    let list_1 = list!["a", "a"];
    let list_1_prime = list!["a", "a"];
    let list_2 = list!["a", "b"];

    assert_eq!(list_1, list_1_prime);
    assert_eq!(list_1, list_1);

    // We also check this since `assert_ne!()` does not call `ne`.
    assert!(list_1.ne(&list_2));
}

#[test]
fn test_clone() {
    let list = list!["there", "hello"];
    let mut clone = list.clone();

    assert_eq!(clone, list);

    clone.push_back("world");

    assert_eq!(clone.len(), 3);
    assert_eq!(list.len(), 2);
}

fn hash<T: Hash>(list: &List<T>) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();

    list.hash(&mut hasher);

    hasher.finish()
}

#[test]
fn test_hash() {
    let list_1 = list!["a"];
    let list_1_prime = list!["a"];
    let list_2 = list!["a", "b"];

    assert_eq!(hash(&list_1), hash(&list_1));
    assert_eq!(hash(&list_1), hash(&list_1_prime));
    assert_ne!(hash(&list_1), hash(&list_2));
}
