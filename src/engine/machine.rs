//! The transduction engine.

use crate::core::{char_tokens, Emit, RunTrace, State, StepRecord, StepSource, Token, Transition};
use crate::engine::error::RunError;
use crate::engine::hooks::Hooks;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::{HashMap, VecDeque};
use std::fmt::Debug;

/// Exact-literal transition table of one state.
pub type TransitionTable<S, T> = HashMap<String, Transition<S, T>>;

/// Upper bound on the number of tokens a single run may consume.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepBudget {
    /// No bound
    #[default]
    Unlimited,
    /// A fixed number of steps regardless of input size
    Fixed(usize),
    /// `n` steps per character of input, plus one per input token
    PerInputChar(usize),
}

impl StepBudget {
    fn limit<T>(&self, input: &VecDeque<Token<T>>) -> Option<usize> {
        match *self {
            Self::Unlimited => None,
            Self::Fixed(n) => Some(n),
            Self::PerInputChar(n) => {
                let chars: usize = input.iter().map(Token::char_len).sum();
                Some(n.saturating_mul(chars).saturating_add(input.len()))
            }
        }
    }
}

/// Output of a traced run.
#[derive(Debug)]
pub struct TracedRun<S, T> {
    pub output: Vec<Token<S>>,
    pub trace: RunTrace<S, T>,
}

/// A finite-state token transducer.
///
/// Machines are immutable once built (see `builder::MachineBuilder`) and can
/// be shared between threads; every run owns its own queue and buffer.
///
/// # Example
///
/// ```rust
/// use braille_fsm::builder::MachineBuilder;
/// use braille_fsm::core::{Token, Transition};
///
/// let state = "default".to_string();
/// let machine = MachineBuilder::<String, ()>::new()
///     .start(state.clone())
///     .state(
///         state.clone(),
///         vec![
///             ("a".to_string(), Transition::to(state.clone()).emit("1")),
///             (" ".to_string(), Transition::to(state.clone()).flush()),
///         ],
///     )
///     .unwrap()
///     .build()
///     .unwrap();
///
/// let out = machine.run_chars("aa a").unwrap();
/// assert_eq!(out, vec![Token::new("11", state.clone()), Token::new("1", state)]);
/// ```
pub struct Machine<S: State, T> {
    pub(crate) states: HashMap<S, TransitionTable<S, T>>,
    pub(crate) start: S,
    pub(crate) hooks: Hooks<S, T>,
    pub(crate) budget: StepBudget,
}

impl<S, T> Machine<S, T>
where
    S: State,
    T: Clone + PartialEq + Debug,
{
    /// The state every run starts in.
    pub fn start_state(&self) -> &S {
        &self.start
    }

    /// Whether `state` has a transition table.
    pub fn has_state(&self, state: &S) -> bool {
        self.states.contains_key(state)
    }

    /// Iterate over every state and its table.
    pub fn states(&self) -> impl Iterator<Item = (&S, &TransitionTable<S, T>)> {
        self.states.iter()
    }

    /// Exact-literal lookup without running anything.
    pub fn lookup(&self, state: &S, text: &str) -> Option<&Transition<S, T>> {
        self.states.get(state).and_then(|table| table.get(text))
    }

    pub fn step_budget(&self) -> StepBudget {
        self.budget
    }

    /// Run over raw text, one untagged token per character.
    pub fn run_chars(&self, text: &str) -> Result<Vec<Token<S>>, RunError<S>> {
        self.run(char_tokens(text))
    }

    /// Run over a pre-tagged token sequence.
    pub fn run<I>(&self, input: I) -> Result<Vec<Token<S>>, RunError<S>>
    where
        I: IntoIterator<Item = Token<T>>,
    {
        self.execute(input, None)
    }

    /// Run and also record every applied transition.
    pub fn run_traced<I>(&self, input: I) -> Result<TracedRun<S, T>, RunError<S>>
    where
        I: IntoIterator<Item = Token<T>>,
    {
        let mut trace = RunTrace::new();
        let output = self.execute(input, Some(&mut trace))?;
        Ok(TracedRun { output, trace })
    }

    fn execute<I>(
        &self,
        input: I,
        mut trace: Option<&mut RunTrace<S, T>>,
    ) -> Result<Vec<Token<S>>, RunError<S>>
    where
        I: IntoIterator<Item = Token<T>>,
    {
        let mut pending: VecDeque<Token<T>> = input.into_iter().collect();
        let mut buffer = String::new();
        let mut output: Vec<Token<S>> = Vec::new();
        let mut state = self.start.clone();
        let limit = self.budget.limit(&pending);
        let mut steps = 0usize;

        while let Some(token) = pending.pop_front() {
            steps += 1;
            if let Some(limit) = limit {
                if steps > limit {
                    return Err(RunError::StepLimitExceeded {
                        limit,
                        partial: output,
                    });
                }
            }

            let Some(table) = self.states.get(&state) else {
                return Err(RunError::UndefinedState {
                    state: state.name().to_string(),
                    partial: output,
                });
            };

            let (transition, source) = match table.get(token.text()) {
                Some(t) => (Cow::Borrowed(t), StepSource::Literal),
                None => match self.hooks.transform(token.text(), token.tag(), &state) {
                    Some(t) if t.requeues_unchanged(&token, &state) => {
                        tracing::warn!(
                            text = token.text(),
                            state = state.name(),
                            "transform re-queued its own input unchanged; ignoring"
                        );
                        if let Some(trace) = trace.as_deref_mut() {
                            trace.record_dropped(token);
                        }
                        continue;
                    }
                    Some(t) => (Cow::Owned(t), StepSource::Transform),
                    None => {
                        tracing::warn!(
                            text = token.text(),
                            state = state.name(),
                            "token not recognised; ignoring"
                        );
                        if let Some(trace) = trace.as_deref_mut() {
                            trace.record_dropped(token);
                        }
                        continue;
                    }
                },
            };

            let mut emitted = 0;
            for entry in &transition.output_push {
                match entry {
                    Emit::Flush => {
                        let text = std::mem::take(&mut buffer);
                        if let Some(record) = self.hooks.postprocess(text, token.tag(), &state) {
                            output.push(record);
                            emitted += 1;
                        }
                    }
                    Emit::Text(text) => buffer.push_str(text),
                }
            }

            for pushed in transition.input_push.iter().rev() {
                pending.push_front(pushed.clone());
            }

            let next = transition.next.clone();
            tracing::trace!(
                text = token.text(),
                from = state.name(),
                to = next.name(),
                pushed = transition.input_push.len(),
                pending = pending.len(),
                "step"
            );

            if let Some(trace) = trace.as_deref_mut() {
                trace.record(StepRecord {
                    from: state.clone(),
                    to: next.clone(),
                    pushed: transition.input_push.len(),
                    input: token,
                    source,
                    emitted,
                });
            }

            if !self.states.contains_key(&next) {
                tracing::error!(state = next.name(), "reached undefined state");
                return Err(RunError::UndefinedState {
                    state: next.name().to_string(),
                    partial: output,
                });
            }
            state = next;
        }

        if !buffer.is_empty() {
            if let Some(record) = self.hooks.postprocess(buffer, None, &state) {
                output.push(record);
            }
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::MachineBuilder;
    use crate::state_enum;

    state_enum! {
        enum Mode {
            Space,
            Word,
            Missing,
        }
    }

    /// Words separated by spaces, each word flushed as one record.
    fn word_machine() -> Machine<Mode, Mode> {
        let letters = ('a'..='z').map(|c| c.to_string());
        let word_from_space: Vec<_> = letters
            .clone()
            .map(|l| (l.clone(), Transition::to(Mode::Word).flush().emit(l)))
            .collect();
        let word_in_word: Vec<_> = letters
            .map(|l| (l.clone(), Transition::to(Mode::Word).emit(l)))
            .collect();

        MachineBuilder::new()
            .start(Mode::Space)
            .state(Mode::Space, word_from_space)
            .unwrap()
            .state(Mode::Word, word_in_word)
            .unwrap()
            .state(
                Mode::Word,
                vec![(" ".to_string(), Transition::to(Mode::Space).flush())],
            )
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn flush_groups_buffered_text() {
        let out = word_machine().run_chars("ab cd").unwrap();
        assert_eq!(
            out,
            vec![Token::new("ab", Mode::Word), Token::new("cd", Mode::Word)]
        );
    }

    #[test]
    fn unknown_tokens_are_dropped_and_run_continues() {
        let traced = word_machine().run_traced(char_tokens("a!b")).unwrap();
        assert_eq!(traced.output, vec![Token::new("ab", Mode::Word)]);
        assert_eq!(traced.trace.dropped(), &[Token::untagged("!")]);
    }

    #[test]
    fn empty_input_produces_no_output() {
        assert!(word_machine().run_chars("").unwrap().is_empty());
    }

    #[test]
    fn trailing_buffer_is_flushed_with_final_state() {
        let out = word_machine().run_chars("  xy").unwrap();
        assert_eq!(out, vec![Token::new("xy", Mode::Word)]);
    }

    #[test]
    fn pushed_tokens_are_resolved_before_queued_input() {
        let machine: Machine<Mode, Mode> = MachineBuilder::new()
            .start(Mode::Word)
            .state(
                Mode::Word,
                vec![
                    (
                        "ab".to_string(),
                        Transition::to(Mode::Word)
                            .push(Token::new("a", Mode::Word))
                            .push(Token::new("b", Mode::Word)),
                    ),
                    ("a".to_string(), Transition::to(Mode::Word).emit("A")),
                    ("b".to_string(), Transition::to(Mode::Word).emit("B")),
                    ("c".to_string(), Transition::to(Mode::Word).emit("C")),
                ],
            )
            .unwrap()
            .build()
            .unwrap();

        let input = vec![Token::untagged("ab"), Token::untagged("c")];
        let out = machine.run(input).unwrap();
        assert_eq!(out, vec![Token::new("ABC", Mode::Word)]);
    }

    #[test]
    fn transition_to_undefined_state_is_fatal() {
        let machine: Machine<Mode, Mode> = MachineBuilder::new()
            .start(Mode::Word)
            .state(
                Mode::Word,
                vec![
                    ("a".to_string(), Transition::to(Mode::Word).emit("a").flush()),
                    ("x".to_string(), Transition::to(Mode::Missing)),
                ],
            )
            .unwrap()
            .build()
            .unwrap();

        assert!(machine.run_chars("aa").is_ok());

        let err = machine.run_chars("aaxa").unwrap_err();
        match &err {
            RunError::UndefinedState { state, .. } => assert_eq!(state, "Missing"),
            other => panic!("Expected UndefinedState, got {other:?}"),
        }
        assert_eq!(
            err.partial(),
            &[Token::new("a", Mode::Word), Token::new("a", Mode::Word)]
        );
    }

    #[test]
    fn transform_result_that_requeues_itself_is_dropped() {
        let machine: Machine<Mode, Mode> = MachineBuilder::new()
            .start(Mode::Word)
            .state(
                Mode::Word,
                vec![("a".to_string(), Transition::to(Mode::Word).emit("a"))],
            )
            .unwrap()
            .transform(|text, tag, state: &Mode| {
                let same = match tag {
                    Some(tag) => Token::new(text, *tag),
                    None => Token::untagged(text),
                };
                Some(Transition::to(*state).push(same))
            })
            .build()
            .unwrap();

        let traced = machine.run_traced(char_tokens("aza")).unwrap();
        assert_eq!(traced.output, vec![Token::new("aa", Mode::Word)]);
        assert_eq!(traced.trace.dropped(), &[Token::untagged("z")]);
    }

    #[test]
    fn step_budget_stops_cycling_hooks() {
        // "p" and "q" rewrite into each other forever via a state change.
        let machine: Machine<Mode, Mode> = MachineBuilder::new()
            .start(Mode::Word)
            .state(Mode::Word, Vec::new())
            .unwrap()
            .state(Mode::Space, Vec::new())
            .unwrap()
            .transform(|text, _tag, state: &Mode| {
                let next = if *state == Mode::Word {
                    Mode::Space
                } else {
                    Mode::Word
                };
                Some(Transition::to(next).emit("x").push(Token::untagged(text)))
            })
            .step_budget(StepBudget::PerInputChar(4))
            .build()
            .unwrap();

        let err = machine.run_chars("p").unwrap_err();
        assert!(matches!(err, RunError::StepLimitExceeded { limit: 5, .. }));
    }

    #[test]
    fn postprocess_receives_popped_tag() {
        let machine: Machine<Mode, Mode> = MachineBuilder::new()
            .start(Mode::Word)
            .state(
                Mode::Word,
                vec![
                    ("a".to_string(), Transition::to(Mode::Word).emit("a")),
                    (".".to_string(), Transition::to(Mode::Word).flush()),
                ],
            )
            .unwrap()
            .postprocess(|text, tag, _state: &Mode| {
                let label = tag.map(Mode::name).unwrap_or("none");
                Some(Token::new(format!("{text}/{label}"), Mode::Word))
            })
            .build()
            .unwrap();

        let input = vec![
            Token::untagged("a"),
            Token::new(".", Mode::Space),
            Token::untagged("."),
        ];
        let out = machine.run(input).unwrap();
        let texts: Vec<&str> = out.iter().map(Token::text).collect();
        assert_eq!(texts, vec!["a/Space", "/none"]);
    }

    #[test]
    fn trace_records_each_applied_step() {
        let traced = word_machine().run_traced(char_tokens("a b")).unwrap();
        let path: Vec<&Mode> = traced.trace.get_path();
        assert_eq!(
            path,
            vec![&Mode::Space, &Mode::Word, &Mode::Space, &Mode::Word]
        );
        assert_eq!(traced.trace.steps()[1].emitted, 1);
    }

    #[test]
    fn machines_are_shareable_across_threads() {
        let machine = std::sync::Arc::new(word_machine());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let machine = std::sync::Arc::clone(&machine);
                std::thread::spawn(move || machine.run_chars("hello world").unwrap())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap().len(), 2);
        }
    }
}
