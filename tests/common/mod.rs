//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use gridpro::column::EditColumnConfigurator;
use gridpro::model::GridPro;
use gridpro::EditColumn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub name: String,
    pub age: u32,
    pub subscriber: bool,
}

impl Person {
    pub fn new(name: &str, age: u32, subscriber: bool) -> Self {
        Self {
            name: name.to_string(),
            age,
            subscriber,
        }
    }
}

pub fn people() -> Vec<Person> {
    vec![
        Person::new("Ann", 31, true),
        Person::new("Bo", 42, false),
        Person::new("Cy", 27, true),
    ]
}

/// Records every `(item name, path)` pair a handler sees
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    calls: Rc<RefCell<Vec<(String, String)>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handler closure that appends to this recorder
    pub fn handler(&self) -> impl Fn(&Person, &str) + 'static {
        let calls = Rc::clone(&self.calls);
        move |person: &Person, path: &str| {
            calls
                .borrow_mut()
                .push((person.name.clone(), path.to_string()))
        }
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.borrow().clone()
    }

    pub fn count(&self) -> usize {
        self.calls.borrow().len()
    }
}

/// Grid with three property columns over [`people`]
pub struct PersonGrid {
    pub grid: GridPro<Person>,
    pub keys: Vec<String>,
    pub name: EditColumn,
    pub subscriber: EditColumn,
    pub age: EditColumn,
    pub recorder: Recorder,
}

pub fn person_grid() -> PersonGrid {
    let recorder = Recorder::new();
    let mut grid = GridPro::new();

    let name = grid
        .add_edit_column_for_property(
            "name",
            |p: &Person| p.name.clone(),
            EditColumnConfigurator::text(recorder.handler()),
        )
        .unwrap();
    let subscriber = grid
        .add_edit_column_for_property(
            "subscriber",
            |p: &Person| p.subscriber.to_string(),
            EditColumnConfigurator::checkbox(recorder.handler()),
        )
        .unwrap();
    let age = grid
        .add_edit_column_for_property(
            "age",
            |p: &Person| p.age.to_string(),
            EditColumnConfigurator::select(recorder.handler(), ["27", "31", "42"]).unwrap(),
        )
        .unwrap();

    let keys = grid.set_items(people());
    grid.take_commands();

    PersonGrid {
        grid,
        keys,
        name,
        subscriber,
        age,
        recorder,
    }
}
