use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::runner::ds::value::Value;

pub struct ListData {
    items: Vec<Value>,
    /// Marks a list that a proxy pipeline hands on as one argument instead of spreading it.
    whole: bool,
}

/// A shared, mutable ordered sequence.
#[derive(Clone)]
pub struct ListRef(Rc<RefCell<ListData>>);

impl ListRef {
    pub fn new(items: Vec<Value>) -> Self {
        ListRef(Rc::new(RefCell::new(ListData {
            items,
            whole: false,
        })))
    }

    /// A list that proxy pipelines pass to the next step as a single argument.
    pub fn whole(items: Vec<Value>) -> Self {
        ListRef(Rc::new(RefCell::new(ListData { items, whole: true })))
    }

    pub fn is_whole(&self) -> bool {
        self.0.borrow().whole
    }

    pub fn items(&self) -> Vec<Value> {
        self.0.borrow().items.clone()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Value {
        self.0
            .borrow()
            .items
            .get(index)
            .cloned()
            .unwrap_or(Value::Undefined)
    }

    /// Writes at `index`, padding with `Undefined` when writing past the end.
    pub fn set(&self, index: usize, value: Value) {
        let mut data = self.0.borrow_mut();
        if index >= data.items.len() {
            data.items.resize(index + 1, Value::Undefined);
        }
        data.items[index] = value;
    }

    pub fn push(&self, value: Value) {
        self.0.borrow_mut().items.push(value);
    }

    pub fn same(&self, other: &ListRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ListRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0.borrow();
        f.debug_list().entries(data.items.iter()).finish()
    }
}
