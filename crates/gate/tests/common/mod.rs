#![allow(dead_code)]

use gate::{Subject, SubjectKind};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tracing_subscriber::EnvFilter;

pub static POST: SubjectKind = SubjectKind::new("Post");
pub static ARTICLE: SubjectKind = SubjectKind::extends("Article", &POST);
pub static COMMENT: SubjectKind = SubjectKind::new("Comment");

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: u64,
    pub admin: bool,
}

impl User {
    pub fn new(id: u64) -> Self {
        Self { id, admin: false }
    }

    pub fn admin(id: u64) -> Self {
        Self { id, admin: true }
    }
}

#[derive(Debug)]
pub struct Post {
    pub author: u64,
}

impl Subject for Post {
    fn kind(&self) -> &'static SubjectKind {
        &POST
    }
}

#[derive(Debug)]
pub struct Article {
    pub author: u64,
}

impl Subject for Article {
    fn kind(&self) -> &'static SubjectKind {
        &ARTICLE
    }
}

/// A shared flag recording that a callback body ran.
#[derive(Debug, Clone, Default)]
pub struct Flag(Arc<AtomicBool>);

impl Flag {
    pub fn set(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// A shared counter of callback invocations.
#[derive(Debug, Clone, Default)]
pub struct Calls(Arc<AtomicUsize>);

impl Calls {
    pub fn hit(&self) -> usize {
        self.0.fetch_add(1, Ordering::SeqCst)
    }

    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
