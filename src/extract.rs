// src/extract.rs
//! Per-submission stream extraction and ProcStream assembly.
//!
//! Each function definition is reduced to a normalized token stream: local
//! identifier names are discarded, call sites collapse to a `FUNC` marker,
//! keywords and punctuation pass through verbatim. A per-submission call
//! dictionary records the order in which `main` first calls each name; that
//! order (the invocation rank) decides which function streams are merged
//! into the submission's fingerprint and in what order.
//!
//! Quirk preserved from the reference behavior: ranks are assigned only
//! while scanning `main`'s own body. A call appearing inside any other
//! function never assigns a rank, regardless of where that function sits in
//! the file.

use crate::config::Config;
use crate::error::{Result, SimError};
use crate::lexer::{Lexer, Token, RECORD_END};
use crate::trie::PrefixMap;
use crate::types::{FuncStream, Rejected, Submission};
use colored::Colorize;
use std::collections::HashSet;

/// Marker token standing in for a resolved call site.
pub const FUNC_MARKER: &str = "FUNC";

/// Rank reserved for the entry point.
const ENTRY_RANK: u32 = 1;

/// Result of parsing one batch buffer: the surviving submissions plus a
/// record of everything that was skipped.
#[derive(Debug, Default)]
pub struct ParseOutcome {
    pub submissions: Vec<Submission>,
    pub rejected: Vec<Rejected>,
}

/// Parses a whole batch buffer into submissions.
///
/// A record starts with a positive integer id and ends at a form feed where
/// a function name would otherwise start; id 0 or end of buffer terminates
/// the batch. A malformed submission is skipped (the cursor resyncs to the
/// next record) and the rest of the batch is still parsed.
///
/// # Errors
///
/// Per-submission failures are collected in `ParseOutcome::rejected`, never
/// returned; the only fatal condition here is none (the signature keeps
/// `Result` for future fatal modes and call-site uniformity).
pub fn parse_batch(buf: &str, keywords: &PrefixMap, config: &Config) -> Result<ParseOutcome> {
    let mut lexer = Lexer::new(buf);
    let mut outcome = ParseOutcome::default();
    let mut seen_ids: HashSet<u32> = HashSet::new();

    loop {
        let id = lexer.read_id();
        if id == 0 {
            break;
        }

        if outcome.submissions.len() >= config.max_submissions {
            outcome.rejected.push(Rejected {
                id,
                reason: SimError::CapacityExceeded {
                    what: "submissions",
                    limit: config.max_submissions,
                }
                .to_string(),
            });
            break;
        }

        match parse_submission(&mut lexer, id, keywords, config) {
            Ok(sub) => {
                if seen_ids.insert(id) {
                    outcome.submissions.push(sub);
                } else {
                    outcome.rejected.push(Rejected {
                        id,
                        reason: SimError::DuplicateId { id }.to_string(),
                    });
                }
            }
            Err(err) => {
                // A missing entry point is only detected after the record
                // separator was consumed; resyncing would eat the next
                // record. Every other failure leaves the cursor mid-record.
                let resync = !matches!(err, SimError::MissingEntryPoint { .. });
                outcome.rejected.push(Rejected {
                    id,
                    reason: err.to_string(),
                });
                if resync {
                    lexer.skip_to_record_end();
                }
            }
        }
    }

    Ok(outcome)
}

/// Parses one submission record and assembles its ProcStream.
fn parse_submission(
    lexer: &mut Lexer<'_>,
    id: u32,
    keywords: &PrefixMap,
    config: &Config,
) -> Result<Submission> {
    // Short-lived call dictionary; dropped with this stack frame once the
    // ProcStream below is built.
    let mut call_dict = PrefixMap::new(config.max_trie_nodes);
    let mut funcs: Vec<FuncStream> = Vec::new();

    while let Some(func) = parse_function(lexer, &mut call_dict, keywords, config)? {
        if funcs.len() >= config.max_functions {
            return Err(SimError::CapacityExceeded {
                what: "functions per submission",
                limit: config.max_functions,
            });
        }
        funcs.push(func);
    }

    if call_dict.lookup("main").is_none() {
        return Err(SimError::MissingEntryPoint { id });
    }

    // Rank resolution happens here, by name lookup, not during extraction.
    for func in &mut funcs {
        func.rank = call_dict.lookup(&func.name);
    }
    let invoked_count = funcs.iter().filter(|f| f.rank.is_some()).count();

    // Stable sort: ascending rank, unreferenced functions last (and dropped
    // by the rank cutoff below), ties kept in declaration order.
    let mut order: Vec<usize> = (0..funcs.len()).collect();
    order.sort_by_key(|&i| funcs[i].rank.unwrap_or(u32::MAX));

    let mut proc_stream = String::new();
    for &i in &order {
        match funcs[i].rank {
            Some(rank) if rank as usize <= invoked_count => {
                proc_stream.push_str(&funcs[i].stream);
            }
            _ => break,
        }
    }

    if config.verbose {
        log_submission(id, &funcs, &order, invoked_count, &proc_stream);
    }

    Ok(Submission {
        id,
        funcs,
        invoked_count,
        proc_stream,
    })
}

/// Extracts one function's normalized stream, or `None` at the record end.
///
/// The first token of a definition is taken as the function name (return
/// types are not tokenized separately). The parameter list is skipped by
/// paren depth, then the body is scanned by brace depth with a single
/// pending-identifier slot: a non-keyword identifier is held back and either
/// becomes a `FUNC` marker (when `(` follows) or is discarded.
fn parse_function(
    lexer: &mut Lexer<'_>,
    call_dict: &mut PrefixMap,
    keywords: &PrefixMap,
    config: &Config,
) -> Result<Option<FuncStream>> {
    let name = match lexer.next_token() {
        None | Some(Token::Symbol(RECORD_END)) => return Ok(None),
        Some(Token::Ident(s)) => {
            if s.len() > config.max_ident_len {
                return Err(SimError::CapacityExceeded {
                    what: "identifier length",
                    limit: config.max_ident_len,
                });
            }
            s.to_string()
        }
        Some(Token::Symbol(ch)) => ch.to_string(),
    };

    let is_main = name == "main";
    let mut next_rank = ENTRY_RANK;
    if is_main {
        call_dict.insert(&name, next_rank)?;
        next_rank += 1;
    }

    skip_params(lexer, &name)?;
    let stream = scan_body(lexer, call_dict, keywords, config, &name, is_main, next_rank)?;

    Ok(Some(FuncStream {
        name,
        rank: None,
        stream,
    }))
}

/// Skips the parameter list: depth starts at the next `(`, closes at zero.
/// The first token not opening a paren ends the skip immediately.
fn skip_params(lexer: &mut Lexer<'_>, func: &str) -> Result<()> {
    let mut depth: u32 = 0;
    loop {
        let token = lexer.next_token().ok_or_else(|| SimError::UnexpectedEof {
            func: func.to_string(),
        })?;
        match token {
            Token::Symbol('(') => depth += 1,
            Token::Symbol(')') => {
                depth = depth.checked_sub(1).ok_or_else(|| SimError::UnbalancedParens {
                    func: func.to_string(),
                })?;
            }
            _ => {}
        }
        if depth == 0 {
            return Ok(());
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn scan_body(
    lexer: &mut Lexer<'_>,
    call_dict: &mut PrefixMap,
    keywords: &PrefixMap,
    config: &Config,
    func: &str,
    is_main: bool,
    mut next_rank: u32,
) -> Result<String> {
    let mut stream = String::new();
    let mut depth: u32 = 0;
    let mut pending: Option<&str> = None;

    loop {
        let token = lexer.next_token().ok_or_else(|| SimError::UnexpectedEof {
            func: func.to_string(),
        })?;

        match token {
            Token::Ident(s) if !keywords.contains(s) => {
                if s.len() > config.max_ident_len {
                    return Err(SimError::CapacityExceeded {
                        what: "identifier length",
                        limit: config.max_ident_len,
                    });
                }
                // Replaces any previous pending identifier; plain identifier
                // names never reach the stream.
                pending = Some(s);
            }
            other => {
                match other {
                    Token::Symbol('(') if pending.is_some() => {
                        stream.push_str(FUNC_MARKER);
                        if is_main {
                            let callee = pending.unwrap_or_default();
                            if call_dict.lookup(callee).is_none() {
                                call_dict.insert(callee, next_rank)?;
                                next_rank += 1;
                            }
                        }
                    }
                    Token::Symbol('{') => depth += 1,
                    Token::Symbol('}') => {
                        depth =
                            depth
                                .checked_sub(1)
                                .ok_or_else(|| SimError::UnbalancedBraces {
                                    func: func.to_string(),
                                })?;
                    }
                    _ => {}
                }
                other.write_to(&mut stream);
                pending = None;
            }
        }

        // Depth returning to zero after a processed token ends the body;
        // the normal case is the matching closing brace.
        if depth == 0 {
            break;
        }
    }

    Ok(stream)
}

fn log_submission(
    id: u32,
    funcs: &[FuncStream],
    order: &[usize],
    invoked_count: usize,
    proc_stream: &str,
) {
    eprintln!("{} submission {id}: {invoked_count} invoked", "::".dimmed());
    for &i in order {
        let Some(rank) = funcs[i].rank else { continue };
        if rank as usize > invoked_count {
            continue;
        }
        eprintln!(
            "{}   <{}> rank {} | {}",
            "::".dimmed(),
            funcs[i].name,
            rank,
            funcs[i].stream
        );
    }
    eprintln!("{}   fingerprint: {proc_stream}", "::".dimmed());
}
