//! Optimistic mutations.
//!
//! A [`Mutation`] changes local state immediately, before the backend has
//! answered. When the answer arrives the pending change is settled: on
//! success it is reconciled with the authoritative result, on failure it is
//! rolled back so no trace of the attempt remains.
//!
//! The split between [`apply`] and [`Pending::settle`] lets callers run the
//! remote call on another task and settle later from the event loop. For
//! code that can hold the state across the call, [`run`] does all three
//! steps.

use std::future::Future;
use std::marker::PhantomData;

/// A local change with reconcile and rollback steps.
pub trait Mutation<S> {
    /// What `apply` leaves behind for the settle step (e.g. a position or
    /// a snapshot).
    type Token;
    /// The authoritative value the backend returns on success.
    type Confirmed;

    /// Make the local change.
    fn apply(&self, state: &mut S) -> Self::Token;

    /// Replace the local change with the confirmed result.
    fn reconcile(self, state: &mut S, token: Self::Token, confirmed: Self::Confirmed);

    /// Undo the local change.
    fn rollback(self, state: &mut S, token: Self::Token);
}

/// An applied mutation waiting for the backend's answer.
#[must_use = "a pending mutation must be settled"]
pub struct Pending<S, M: Mutation<S>> {
    mutation: M,
    token: M::Token,
    _state: PhantomData<fn(&mut S)>,
}

impl<S, M: Mutation<S>> std::fmt::Debug for Pending<S, M>
where
    M: std::fmt::Debug,
    M::Token: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pending")
            .field("mutation", &self.mutation)
            .field("token", &self.token)
            .finish()
    }
}

/// Apply `mutation` to `state` and return the pending handle.
pub fn apply<S, M: Mutation<S>>(state: &mut S, mutation: M) -> Pending<S, M> {
    let token = mutation.apply(state);
    Pending {
        mutation,
        token,
        _state: PhantomData,
    }
}

impl<S, M: Mutation<S>> Pending<S, M> {
    pub fn mutation(&self) -> &M {
        &self.mutation
    }

    /// Reconcile on `Ok`, roll back on `Err`. The error is handed back to
    /// the caller for display.
    pub fn settle<E>(self, state: &mut S, result: Result<M::Confirmed, E>) -> Result<(), E> {
        match result {
            Ok(confirmed) => {
                self.mutation.reconcile(state, self.token, confirmed);
                Ok(())
            }
            Err(err) => {
                self.mutation.rollback(state, self.token);
                Err(err)
            }
        }
    }

    /// Roll back without a result (the request was never sent).
    pub fn abandon(self, state: &mut S) {
        self.mutation.rollback(state, self.token);
    }
}

/// Apply, await the remote call, then settle.
pub async fn run<S, M, F, E>(state: &mut S, mutation: M, remote: F) -> Result<(), E>
where
    M: Mutation<S>,
    F: Future<Output = Result<M::Confirmed, E>>,
{
    let pending = apply(state, mutation);
    let result = remote.await;
    pending.settle(state, result)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Push a provisional negative entry; swap it for the confirmed value.
    struct PushProvisional(i32);

    impl Mutation<Vec<i32>> for PushProvisional {
        type Token = usize;
        type Confirmed = i32;

        fn apply(&self, state: &mut Vec<i32>) -> usize {
            state.push(-self.0);
            state.len() - 1
        }

        fn reconcile(self, state: &mut Vec<i32>, token: usize, confirmed: i32) {
            state[token] = confirmed;
        }

        fn rollback(self, state: &mut Vec<i32>, token: usize) {
            state.remove(token);
        }
    }

    #[test]
    fn test_apply_is_visible_before_settle() {
        let mut state = vec![1];
        let pending = apply(&mut state, PushProvisional(2));
        assert_eq!(state, vec![1, -2]);
        pending.settle::<()>(&mut state, Ok(2)).unwrap();
        assert_eq!(state, vec![1, 2]);
    }

    #[test]
    fn test_failure_rolls_back_and_returns_error() {
        let mut state = vec![1];
        let pending = apply(&mut state, PushProvisional(2));
        let err = pending.settle(&mut state, Err("boom")).unwrap_err();
        assert_eq!(err, "boom");
        assert_eq!(state, vec![1]);
    }

    #[test]
    fn test_abandon_rolls_back() {
        let mut state = vec![];
        let pending = apply(&mut state, PushProvisional(7));
        pending.abandon(&mut state);
        assert!(state.is_empty());
    }

    #[tokio::test]
    async fn test_run_success_and_failure() {
        let mut state = vec![];
        run(&mut state, PushProvisional(3), async { Ok::<_, String>(3) })
            .await
            .unwrap();
        assert_eq!(state, vec![3]);

        let result = run(&mut state, PushProvisional(4), async {
            Err::<i32, _>("offline".to_string())
        })
        .await;
        assert!(result.is_err());
        assert_eq!(state, vec![3]);
    }
}
