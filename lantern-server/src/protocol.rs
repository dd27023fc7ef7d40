//! Wire message records.
//!
//! Payloads carry no type tag; protocol state decides the shape. The
//! handshake always carries a `Setup`, and every exchange afterwards is a
//! `Query` answered by an `Answer`. Decoding validates against the shape
//! expected for the current state and anything else is rejected.

use crate::snapshot::CorpusSnapshot;
use lantern_pir::Matrix;
use serde::{Deserialize, Serialize};

/// The parameter block inside `Setup`.
///
/// The public matrix `a` travels beside this block, not inside it; that
/// is the layout deployed clients already parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireParams {
    pub n: usize,
    pub m: usize,
    pub q: u64,
    pub p: u64,
    pub std_dev: f64,
}

/// Handshake message: the pinned snapshot's public data.
#[derive(Debug, Serialize)]
pub struct Setup<'a> {
    pub params: WireParams,
    pub hint: &'a Matrix,
    pub a: &'a Matrix,
    pub num_articles: usize,
}

impl<'a> Setup<'a> {
    pub fn for_snapshot(snapshot: &'a CorpusSnapshot) -> Self {
        Setup {
            params: WireParams {
                n: snapshot.params.n,
                m: snapshot.params.m,
                q: snapshot.params.q,
                p: snapshot.params.p,
                std_dev: snapshot.params.std_dev,
            },
            hint: &snapshot.hint,
            a: &snapshot.params.a,
            num_articles: snapshot.article_count,
        }
    }
}

/// One client query.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Query {
    pub query: Vec<u64>,
}

/// The answer to one query.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Answer {
    pub answer: Vec<u64>,
}
