//! Per-emission-call state threaded through the statement emitters:
//! which class/method we're inside (for `this.m()` dispatch and field
//! lookups), whether the enclosing function returns `string` (for
//! out-buffer lowering, §4.6), and the stack of enclosing `catch_label`s
//! a `throw` should jump to.

use std::cell::{Cell, RefCell};

use crate::resolver::ResolverContext;
use crate::session::CompileSession;

pub struct EmitCtx<'a> {
    pub session: &'a CompileSession,
    pub resolver: &'a ResolverContext<'a>,
    pub current_class: Option<String>,
    pub returns_string: bool,
    catch_labels: RefCell<Vec<String>>,
    label_counter: Cell<usize>,
}

impl<'a> EmitCtx<'a> {
    pub fn new(session: &'a CompileSession, resolver: &'a ResolverContext<'a>) -> Self {
        Self {
            session,
            resolver,
            current_class: None,
            returns_string: false,
            catch_labels: RefCell::new(Vec::new()),
            label_counter: Cell::new(0),
        }
    }

    /// A fresh context for emitting one method/constructor body of `class_name`.
    pub fn for_method(&self, class_name: &str, returns_string: bool) -> Self {
        Self {
            session: self.session,
            resolver: self.resolver,
            current_class: Some(class_name.to_owned()),
            returns_string,
            catch_labels: RefCell::new(Vec::new()),
            label_counter: Cell::new(0),
        }
    }

    /// A fresh context for emitting one top-level function body.
    pub fn for_function(&self, returns_string: bool) -> Self {
        Self {
            session: self.session,
            resolver: self.resolver,
            current_class: None,
            returns_string,
            catch_labels: RefCell::new(Vec::new()),
            label_counter: Cell::new(0),
        }
    }

    /// Push a fresh, function-unique `catch_N` label and return it.
    pub fn push_catch_label(&self) -> String {
        let n = self.label_counter.get();
        self.label_counter.set(n + 1);
        let label = format!("catch_{n}");
        self.catch_labels.borrow_mut().push(label.clone());
        label
    }

    pub fn pop_catch_label(&self) {
        self.catch_labels.borrow_mut().pop();
    }

    /// The label a `throw` reached at this point in the body should jump
    /// to: the innermost enclosing `try`, or `None` if there is none.
    pub fn current_catch_label(&self) -> Option<String> {
        self.catch_labels.borrow().last().cloned()
    }
}
