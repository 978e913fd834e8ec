mod common;

use anyhow::Result;
use common::{names, record, strings, Journal};
use trigger_dispatch::trigger::{Dispatcher, HandlerError, InvocationContext, Record, TriggerEvent, TriggerHandler};

/// Handler whose after-insert inserts child records, re-entering the dispatcher
struct Cascade {
    depth: usize,
    max_depth: usize,
    seen: Vec<(usize, Vec<String>)>,
}

impl TriggerHandler for Cascade {
    fn after_insert(&mut self, new: &[Record]) -> Result<(), HandlerError> {
        self.seen.push((self.depth, names(new)));
        if self.depth >= self.max_depth {
            return Ok(());
        }

        let children: Vec<Record> = new
            .iter()
            .flat_map(|parent| names(std::slice::from_ref(parent)))
            .map(|name| record(&format!("{}.child", name)))
            .collect();

        let mut nested = Cascade {
            depth: self.depth + 1,
            max_depth: self.max_depth,
            seen: Vec::new(),
        };
        Dispatcher::run(&mut nested, &InvocationContext::after_insert(children))?;
        self.seen.extend(nested.seen);
        Ok(())
    }
}

#[test]
fn nested_dispatch_is_independent() -> Result<()> {
    let mut root = Cascade { depth: 0, max_depth: 2, seen: Vec::new() };

    Dispatcher::run(&mut root, &InvocationContext::after_insert(vec![record("P")]))?;

    assert_eq!(
        root.seen,
        vec![
            (0, strings(&["P"])),
            (1, strings(&["P.child"])),
            (2, strings(&["P.child.child"])),
        ]
    );
    Ok(())
}

#[test]
fn parallel_dispatch_does_not_interfere() {
    let results: Vec<Vec<common::Entry>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                scope.spawn(move || {
                    let mut journal = Journal::new();
                    let name = format!("R{}", i);
                    let ctx = if i % 2 == 0 {
                        InvocationContext::before_insert(vec![record(&name)])
                    } else {
                        InvocationContext::after_delete(vec![record(&name)])
                    };
                    Dispatcher::run(&mut journal, &ctx).map(|_| journal.entries)
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().expect("dispatch thread panicked").expect("dispatch failed"))
            .collect()
    });

    for (i, entries) in results.iter().enumerate() {
        let name = vec![format!("R{}", i)];
        let expected = if i % 2 == 0 {
            (TriggerEvent::BeforeInsert, vec![], name)
        } else {
            (TriggerEvent::AfterDelete, name, vec![])
        };
        assert_eq!(entries, &vec![expected]);
    }
}
