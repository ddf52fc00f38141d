use circular_deque::{Deque, BASE_CAPACITY};
use std::{cell::RefCell, rc::Rc};

#[derive(Debug)]
struct DropTracker {
  id: String,
  payload: String,
  log: Rc<RefCell<Vec<String>>>,
}

impl DropTracker {
  fn new(log: &Rc<RefCell<Vec<String>>>, id: i32) -> Self {
    Self {
      id: id.to_string(),
      payload: format!("payload-{id}"),
      log: Rc::clone(log),
    }
  }
}

impl Drop for DropTracker {
  fn drop(&mut self) {
    self.log.borrow_mut().push(self.id.clone());
  }
}

fn main() {
  let drops = Rc::new(RefCell::new(Vec::new()));

  {
    let mut deque = Deque::new();

    for id in 0..20 {
      deque.push_back(DropTracker::new(&drops, id));
    }
    for id in 20..30 {
      deque.push_front(DropTracker::new(&drops, id));
    }
    assert_eq!(deque.capacity(), 32);

    let mut cursor = deque.cursor_rbegin_mut();
    while let Some(elem) = cursor.get_mut() {
      elem.payload.push_str("-rev");
      cursor.move_next();
    }

    // Walk the buffer back down to the base capacity; popped trackers drop here.
    while deque.len() > 2 {
      let front = deque.pop_front();
      assert!(front.is_some_and(|elem| elem.payload.ends_with("-rev")));
      drop(deque.pop_back());
    }
    assert_eq!(deque.capacity(), BASE_CAPACITY);

    for id in 30..40 {
      deque.push_back(DropTracker::new(&drops, id));
    }
    let slice = deque.make_contiguous();
    slice.iter_mut().for_each(|elem| elem.payload.push_str("-contig"));
    assert!(deque.as_slices().1.is_empty());

    let mut iter = deque.into_iter();
    drop(iter.next());
    drop(iter.next_back());
  }

  {
    let mut deque = Deque::new();
    for id in 40..50 {
      deque.push_front(DropTracker::new(&drops, id));
    }
    let copy: Vec<String> = deque.iter().map(|elem| elem.payload.clone()).collect();
    assert_eq!(copy.len(), 10);
    deque.clear();
    assert_eq!(deque.capacity(), BASE_CAPACITY);
  }

  let mut dropped = drops.borrow().clone();
  dropped.sort_by_key(|id| id.parse::<i32>().unwrap_or_default());
  let expected = (0..50).map(|id| id.to_string()).collect::<Vec<_>>();
  assert_eq!(dropped, expected);
}
