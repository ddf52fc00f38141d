use super::*;
use std::{
  string::{String, ToString},
  vec::Vec,
};

fn s<T: ToString>(value: T) -> String {
  value.to_string()
}

macro_rules! sarr {
  ($($val:expr),+ $(,)?) => {
    [$(s($val)),+]
  };
}

macro_rules! struct_with_counted_drop {
  ($struct_name:ident $(( $( $elt_ty:ty ),+ ))?, $drop_counter:ident) => {
    thread_local! {static $drop_counter: ::core::cell::Cell<u32> = const { ::core::cell::Cell::new(0) };}

    #[derive(Clone, Debug, PartialEq)]
    struct $struct_name $(( $( $elt_ty ),+ ))?;

    impl ::std::ops::Drop for $struct_name {
      fn drop(&mut self) {
        $drop_counter.set($drop_counter.get() + 1);
      }
    }
  };
  ($struct_name:ident $(( $( $elt_ty:ty ),+ ))?, $drop_counter:ident[ $drop_key:expr,$key_ty:ty ]) => {
    thread_local! {
      static $drop_counter: ::core::cell::RefCell<::std::collections::HashMap<$key_ty, u32>> =
        ::core::cell::RefCell::new(::std::collections::HashMap::new());
    }

    #[derive(Clone, Debug, PartialEq)]
    struct $struct_name $(( $( $elt_ty ),+ ))?;

    impl ::std::ops::Drop for $struct_name {
      fn drop(&mut self) {
        $drop_counter.with_borrow_mut(|counter| {
          *counter.entry($drop_key(self)).or_default() += 1;
        });
      }
    }
  };
}

#[test]
fn heap_test_golden_sequence() {
  let mut tester = Deque::new();
  for i in 0..20 {
    tester.push_back(s(2 * i + 1));
  }
  for i in 0..10 {
    tester.push_front(s(2 * -i + 1));
  }

  let expected: Vec<String> = (-17..=1)
    .step_by(2)
    .chain((1..40).step_by(2))
    .map(s)
    .collect();
  assert_eq!(tester, expected);
}

#[test]
fn heap_test_grow_and_shrink_keep_order() {
  let mut tester = Deque::new();
  for head in 0..BASE_CAPACITY {
    tester.head = head;
    tester.tail = head;
    for i in 0..40 {
      tester.push_back(s(i));
    }
    assert_eq!(tester.capacity(), 64);
    for i in 0..36 {
      assert_eq!(tester.pop_front(), Some(s(i)));
    }
    assert_eq!(tester.capacity(), BASE_CAPACITY);
    assert_eq!(tester, sarr![36, 37, 38, 39]);
    tester.clear();
  }
}

#[test]
fn heap_test_get_mut() {
  let mut tester = Deque::new();
  tester.push_back(s(2));
  tester.push_back(s(3));
  tester.push_front(s(1));

  if let Some(elem) = tester.get_mut(0) {
    assert_eq!(elem, "1");
    *elem = s(10);
  }
  if let Some(elem) = tester.get_mut(2) {
    assert_eq!(elem, "3");
    *elem = s(30);
  }

  assert_eq!(tester.get(0).map(|v| v.as_str()), Some("10"));
  assert_eq!(tester.get(2).map(|v| v.as_str()), Some("30"));
  assert_eq!(tester.get_mut(3), None);
  assert_eq!(tester.at(1).map(|v| v.as_str()), Ok("2"));
}

#[test]
fn heap_test_swap() {
  let mut tester = Deque::new();
  tester.push_back(s(2));
  tester.push_back(s(3));
  tester.push_front(s(1));

  tester.swap(0, 0);
  assert_eq!(tester, sarr![1, 2, 3]);
  tester.swap(0, 1);
  assert_eq!(tester, sarr![2, 1, 3]);
  tester.swap(2, 1);
  assert_eq!(tester, sarr![2, 3, 1]);
}

#[test]
fn heap_test_clone_is_deep() {
  let mut tester: Deque<String> = ["a", "b", "c"].into_iter().map(s).collect();
  let copy = tester.clone();
  tester[1].push('!');
  tester.push_front(s("z"));

  assert_eq!(copy, sarr!["a", "b", "c"]);
  assert_eq!(tester, sarr!["z", "a", "b!", "c"]);
}

#[test]
fn heap_test_cursor_moves_strings() {
  let mut tester: Deque<String> = (0..6).map(s).collect();
  tester.push_front(s(-1));

  let mut cursor = tester.cursor_rbegin_mut();
  while let Some(value) = cursor.get_mut() {
    value.insert(0, '#');
    cursor.move_next();
  }
  assert_eq!(tester, sarr!["#-1", "#0", "#1", "#2", "#3", "#4", "#5"]);

  let mut cursor = tester.cursor_begin_mut();
  cursor.swap_with(6).unwrap();
  assert_eq!(tester.front().map(|v| v.as_str()), Some("#5"));
  assert_eq!(tester.back().map(|v| v.as_str()), Some("#-1"));
}

#[test]
fn heap_test_vec_from_deque() {
  for head in 0..BASE_CAPACITY {
    let mut tester = Deque::new();
    tester.head = head;
    tester.tail = head;
    for i in 0..7 {
      tester.push_back(s(i));
    }
    let vec = Vec::from(tester);
    assert_eq!(vec, sarr![0, 1, 2, 3, 4, 5, 6]);
  }
}

#[test]
fn heap_make_contiguous_wrapped() {
  let mut tester = Deque::new();
  for i in 0..3 {
    tester.push_back(s(i));
  }
  for i in 3..7 {
    tester.push_front(s(i));
  }

  tester.make_contiguous().sort();
  assert_eq!(tester.as_slices().0, sarr![0, 1, 2, 3, 4, 5, 6]);
  assert!(tester.as_slices().1.is_empty());
}

#[test]
fn heap_test_drops_once_across_resizes() {
  struct_with_counted_drop!(Elem(u32), DROPS[|this: &Elem| this.0, u32]);

  let mut tester = Deque::new();
  for id in 0..50 {
    if id % 3 == 0 {
      tester.push_front(Elem(id));
    } else {
      tester.push_back(Elem(id));
    }
  }
  assert_eq!(tester.capacity(), 64);
  DROPS.with_borrow(|drops| assert!(drops.is_empty()));

  // Popped values are dropped by the caller, resizes drop nothing.
  for _ in 0..40 {
    drop(tester.pop_back());
  }
  assert_eq!(tester.capacity(), 32);
  DROPS.with_borrow(|drops| assert_eq!(drops.len(), 40));

  drop(tester);
  DROPS.with_borrow(|drops| {
    assert_eq!(drops.len(), 50);
    assert!(drops.values().all(|&count| count == 1));
  });
}

#[test]
fn heap_test_clear_drops_everything() {
  struct_with_counted_drop!(Elem, DROPS);

  let mut tester = Deque::new();
  for _ in 0..5 {
    tester.push_back(Elem);
  }
  for _ in 0..5 {
    tester.push_front(Elem);
  }
  assert_eq!(DROPS.get(), 0);
  tester.clear();
  assert_eq!(DROPS.get(), 10);
  assert_eq!(tester.capacity(), BASE_CAPACITY);

  tester.push_back(Elem);
  drop(tester);
  assert_eq!(DROPS.get(), 11);
}

#[test]
fn heap_test_into_iter_drops_the_rest() {
  struct_with_counted_drop!(Elem, DROPS);

  let mut tester = Deque::new();
  for _ in 0..6 {
    tester.push_back(Elem);
  }
  tester.push_front(Elem);
  tester.push_front(Elem);

  let mut iter = tester.into_iter();
  drop(iter.next());
  drop(iter.next_back());
  assert_eq!(DROPS.get(), 2);
  drop(iter);
  assert_eq!(DROPS.get(), 8);
}

#[test]
fn heap_test_vec_conversion_drops_nothing() {
  struct_with_counted_drop!(Elem, DROPS);

  let mut tester = Deque::new();
  for _ in 0..3 {
    tester.push_back(Elem);
  }
  tester.push_front(Elem);

  let vec = Vec::from(tester);
  assert_eq!(DROPS.get(), 0);
  assert_eq!(vec.len(), 4);
  drop(vec);
  assert_eq!(DROPS.get(), 4);
}

#[test]
fn heap_test_drop_with_panic() {
  struct_with_counted_drop!(Elem(bool), DROPS);

  impl Elem {
    fn panicking() -> Self {
      Elem(true)
    }
  }

  struct Guarded(Elem);

  impl Drop for Guarded {
    fn drop(&mut self) {
      if self.0 .0 {
        panic!("panic in `drop`");
      }
    }
  }

  let mut tester = Deque::new();
  tester.push_back(Guarded(Elem(false)));
  tester.push_back(Guarded(Elem(false)));
  tester.push_front(Guarded(Elem::panicking()));
  tester.push_front(Guarded(Elem(false)));

  let result = std::panic::catch_unwind(core::panic::AssertUnwindSafe(move || drop(tester)));
  assert!(result.is_err());
  assert_eq!(DROPS.get(), 4);
}
