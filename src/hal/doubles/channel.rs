use super::{error::FakeError, Journal, Operation};
use crate::hal::{
    channel::{Link, StateCell, TimeoutRead, TransportState},
    time::Milliseconds,
};
use std::{cell::Cell, collections::VecDeque, rc::Rc};

/// Simulated host-driven channel. The host "enumerates" it after a
/// configurable number of state polls following a connect.
#[derive(Debug)]
pub struct MockChannel {
    pub journal: Journal,
    pub state: Rc<StateCell>,
    /// State polls after a connect before the host enumerates the
    /// channel. `None` models a host that never does.
    pub polls_until_ready: Option<usize>,
    /// Connect attempts the host ignores before it starts enumerating.
    pub ignored_connects: usize,
    pub incoming: VecDeque<u8>,
    pub fail_reads: bool,
    polls: Cell<usize>,
    connects: usize,
}

impl MockChannel {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            state: Rc::new(StateCell::new()),
            polls_until_ready: Some(0),
            ignored_connects: 0,
            incoming: VecDeque::new(),
            fail_reads: false,
            polls: Cell::new(0),
            connects: 0,
        }
    }

    pub fn ready_after(mut self, polls: Option<usize>) -> Self {
        self.polls_until_ready = polls;
        self
    }

    pub fn ignoring_connects(mut self, connects: usize) -> Self {
        self.ignored_connects = connects;
        self
    }

    /// Queues bytes as if the host had sent them.
    pub fn receive(&mut self, bytes: &[u8]) { self.incoming.extend(bytes.iter().copied()) }
}

impl Link for MockChannel {
    fn disconnect(&mut self) {
        self.journal.record(Operation::Disconnect);
        self.state.store(TransportState::Disconnected);
    }

    fn start(&mut self) {
        self.journal.record(Operation::Start);
        self.state.store(TransportState::Starting);
    }

    fn connect(&mut self) {
        self.journal.record(Operation::Connect);
        self.connects += 1;
        self.polls.set(0);
        self.state.store(TransportState::Connected);
    }

    fn stop(&mut self) {
        self.journal.record(Operation::Stop);
        self.state.store(TransportState::Disconnected);
    }

    fn state(&self) -> TransportState {
        let state = self.state.load();
        if state != TransportState::Connected || self.connects <= self.ignored_connects {
            return state;
        }
        match self.polls_until_ready {
            Some(polls) if self.polls.get() >= polls => {
                self.state.store(TransportState::Ready);
                TransportState::Ready
            }
            _ => {
                self.polls.set(self.polls.get() + 1);
                state
            }
        }
    }
}

impl TimeoutRead for MockChannel {
    type Error = FakeError;

    fn read_with_timeout(
        &mut self,
        buffer: &mut [u8],
        timeout: Milliseconds,
    ) -> Result<usize, Self::Error> {
        self.journal.record(Operation::Read { length: buffer.len(), timeout });
        if self.fail_reads {
            return Err(FakeError);
        }
        let count = buffer.len().min(self.incoming.len());
        buffer.iter_mut().zip(self.incoming.drain(..count)).for_each(|(o, i)| *o = i);
        Ok(count)
    }
}
