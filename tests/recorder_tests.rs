// Host-side tests for the recording session state machine.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
#[path = "../src/recorder.rs"]
mod recorder;

use recorder::*;

fn fragment(len: usize) -> Vec<u8> {
    vec![0xAB; len]
}

#[test]
fn new_session_is_idle_and_empty() {
    let session: CaptureSession<Vec<u8>> = CaptureSession::new();
    assert_eq!(session.state(), SessionState::Idle);
    assert_eq!(session.fragment_count(), 0);
}

#[test]
fn begin_enters_recording() {
    let mut session: CaptureSession<Vec<u8>> = CaptureSession::new();
    assert_eq!(session.begin(), BeginOutcome::Fresh);
    assert_eq!(session.state(), SessionState::Recording);
}

#[test]
fn fragments_outside_a_session_are_rejected() {
    let mut session: CaptureSession<Vec<u8>> = CaptureSession::new();
    assert!(!session.push(fragment(5), 5));
    assert_eq!(session.fragment_count(), 0);
}

#[test]
fn zero_size_fragments_are_dropped_in_order() {
    // Emission sizes [0, 5, 0, 7, 3] must package as [5, 7, 3].
    let mut session: CaptureSession<Vec<u8>> = CaptureSession::new();
    session.begin();
    for size in [0usize, 5, 0, 7, 3] {
        session.push(fragment(size), size as u64);
    }
    let packaged = session.finish().expect("session was recording");
    let sizes: Vec<usize> = packaged.iter().map(|f| f.len()).collect();
    assert_eq!(sizes, vec![5, 7, 3]);
}

#[test]
fn fragments_preserve_emission_order() {
    let mut session: CaptureSession<&[u8]> = CaptureSession::new();
    session.begin();
    session.push(b"first", 5);
    session.push(b"second", 6);
    session.push(b"third", 5);
    let packaged = session.finish().expect("session was recording");
    assert_eq!(packaged, vec![&b"first"[..], &b"second"[..], &b"third"[..]]);
}

#[test]
fn stop_without_start_is_a_no_op() {
    // End-to-end scenario 2: no prior start, no download, no panic.
    let mut session: CaptureSession<Vec<u8>> = CaptureSession::new();
    assert!(session.finish().is_none());
    assert_eq!(session.state(), SessionState::Idle);
}

#[test]
fn repeated_finish_is_idempotent() {
    let mut session: CaptureSession<Vec<u8>> = CaptureSession::new();
    session.begin();
    session.push(fragment(4), 4);
    assert!(session.finish().is_some());
    assert!(session.finish().is_none());
    assert!(session.finish().is_none());
    assert_eq!(session.state(), SessionState::Idle);
}

#[test]
fn start_stop_packages_exactly_once() {
    // End-to-end scenario 1: two fragments in, one package out, idle after.
    let mut session: CaptureSession<Vec<u8>> = CaptureSession::new();
    session.begin();
    assert!(session.push(fragment(10), 10));
    assert!(session.push(fragment(20), 20));
    let packaged = session.finish().expect("one download");
    assert_eq!(packaged.len(), 2);
    assert_eq!(packaged[0].len(), 10);
    assert_eq!(packaged[1].len(), 20);
    assert_eq!(session.state(), SessionState::Idle);
    assert!(session.finish().is_none());
}

#[test]
fn restart_discards_the_prior_session() {
    let mut session: CaptureSession<Vec<u8>> = CaptureSession::new();
    session.begin();
    session.push(fragment(9), 9);

    assert_eq!(session.begin(), BeginOutcome::RestartedPrior);
    assert_eq!(session.fragment_count(), 0);
    assert_eq!(session.state(), SessionState::Recording);

    session.push(fragment(3), 3);
    let packaged = session.finish().expect("fresh session");
    assert_eq!(packaged.len(), 1);
    assert_eq!(packaged[0].len(), 3);
}

#[test]
fn begin_after_finish_starts_clean() {
    let mut session: CaptureSession<Vec<u8>> = CaptureSession::new();
    session.begin();
    session.push(fragment(2), 2);
    session.finish();
    assert_eq!(session.begin(), BeginOutcome::Fresh);
    assert_eq!(session.fragment_count(), 0);
}
