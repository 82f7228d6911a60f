use thiserror::Error;

use crate::solc::{Compile, CompileError};
use crate::task::ValidatorTask;

/// Default attempt budget for [`produce_invalid_contract`].
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

#[derive(Debug, Error)]
#[error("contract generator failure: {0}")]
pub struct GenerateError(pub String);

/// Source of syntactically plausible contract text. Most candidates are
/// expected to compile; the loop below searches for one that does not.
pub trait ContractGenerator {
    fn generate(&mut self) -> Result<String, GenerateError>;
}

#[derive(Debug, Error)]
pub enum ForgeError {
    /// Every attempt produced source the compiler accepted (or the
    /// generator produced nothing to validate).
    #[error("no invalid contract after {attempts} attempts")]
    Exhausted { attempts: u32 },
}

/// Single point deciding which compile errors count as "the candidate is
/// invalid". Toolchain faults currently terminate the search the same way
/// a rejection does; tightening that contract only touches this predicate,
/// not the loop.
fn terminates_search(_err: &CompileError) -> bool {
    true
}

/// Generate candidates until the compiler rejects one, bounded by
/// `max_attempts`. A generator fault spends its attempt and the loop moves
/// on. The returned task is always built from the candidate rejected in
/// the same attempt; exhausting the budget yields [`ForgeError::Exhausted`]
/// and never a stale record.
pub fn produce_invalid_contract(
    generator: &mut dyn ContractGenerator,
    compiler: &dyn Compile,
    max_attempts: u32,
) -> Result<ValidatorTask, ForgeError> {
    for _ in 0..max_attempts {
        let Ok(source) = generator.generate() else {
            continue;
        };
        if let Err(err) = compiler.compile(&source) {
            if terminates_search(&err) {
                return Ok(ValidatorTask::invalid_code(source));
            }
        }
    }
    Err(ForgeError::Exhausted {
        attempts: max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solc::CompileOutput;
    use std::cell::Cell;

    struct CountingGenerator {
        calls: u32,
        fail_first: u32,
    }

    impl ContractGenerator for CountingGenerator {
        fn generate(&mut self) -> Result<String, GenerateError> {
            self.calls += 1;
            if self.calls <= self.fail_first {
                return Err(GenerateError("template exhausted".to_string()));
            }
            Ok(format!("contract C{} {{}}", self.calls))
        }
    }

    struct ScriptedCompiler {
        calls: Cell<u32>,
        reject_from_call: Option<u32>,
    }

    impl ScriptedCompiler {
        fn always_rejecting() -> Self {
            Self {
                calls: Cell::new(0),
                reject_from_call: Some(1),
            }
        }

        fn never_rejecting() -> Self {
            Self {
                calls: Cell::new(0),
                reject_from_call: None,
            }
        }
    }

    impl Compile for ScriptedCompiler {
        fn compile(&self, _source: &str) -> Result<CompileOutput, CompileError> {
            let call = self.calls.get() + 1;
            self.calls.set(call);
            match self.reject_from_call {
                Some(n) if call >= n => Err(CompileError::Rejected {
                    message: "ParserError: expected ';'".to_string(),
                }),
                _ => Ok(CompileOutput::default()),
            }
        }
    }

    #[test]
    fn test_returns_on_first_rejection() {
        let mut generator = CountingGenerator {
            calls: 0,
            fail_first: 0,
        };
        let compiler = ScriptedCompiler::always_rejecting();
        let task = produce_invalid_contract(&mut generator, &compiler, 10).unwrap();
        assert_eq!(generator.calls, 1);
        assert_eq!(compiler.calls.get(), 1);
        assert_eq!(task.contract_code, "contract C1 {}");
    }

    #[test]
    fn test_exhausts_after_exactly_n_attempts() {
        let mut generator = CountingGenerator {
            calls: 0,
            fail_first: 0,
        };
        let compiler = ScriptedCompiler::never_rejecting();
        let err = produce_invalid_contract(&mut generator, &compiler, 7).unwrap_err();
        // No (N+1)-th generation happens after the budget runs out.
        assert_eq!(generator.calls, 7);
        assert_eq!(compiler.calls.get(), 7);
        let ForgeError::Exhausted { attempts } = err;
        assert_eq!(attempts, 7);
    }

    #[test]
    fn test_generator_fault_spends_the_attempt() {
        let mut generator = CountingGenerator {
            calls: 0,
            fail_first: 2,
        };
        let compiler = ScriptedCompiler::always_rejecting();
        let task = produce_invalid_contract(&mut generator, &compiler, 10).unwrap();
        // Two faulted generations, then the third candidate is rejected.
        assert_eq!(generator.calls, 3);
        assert_eq!(compiler.calls.get(), 1);
        assert_eq!(task.contract_code, "contract C3 {}");
    }

    #[test]
    fn test_generator_faults_alone_exhaust_the_budget() {
        let mut generator = CountingGenerator {
            calls: 0,
            fail_first: u32::MAX,
        };
        let compiler = ScriptedCompiler::always_rejecting();
        let err = produce_invalid_contract(&mut generator, &compiler, 3).unwrap_err();
        assert_eq!(generator.calls, 3);
        assert_eq!(compiler.calls.get(), 0);
        assert!(matches!(err, ForgeError::Exhausted { attempts: 3 }));
    }

    #[test]
    fn test_toolchain_fault_currently_terminates_like_a_rejection() {
        struct BrokenToolchain;
        impl Compile for BrokenToolchain {
            fn compile(&self, _source: &str) -> Result<CompileOutput, CompileError> {
                Err(CompileError::Toolchain("solc not found".to_string()))
            }
        }
        let mut generator = CountingGenerator {
            calls: 0,
            fail_first: 0,
        };
        let task = produce_invalid_contract(&mut generator, &BrokenToolchain, 10).unwrap();
        assert_eq!(generator.calls, 1);
        assert_eq!(task.to_line, task.contract_code.lines().count() + 1);
    }

    #[test]
    fn test_accepted_task_line_range() {
        struct FixedGenerator(&'static str);
        impl ContractGenerator for FixedGenerator {
            fn generate(&mut self) -> Result<String, GenerateError> {
                Ok(self.0.to_string())
            }
        }
        let mut generator = FixedGenerator("pragma solidity ^0.8.0;\ncontract C {\n}");
        let compiler = ScriptedCompiler::always_rejecting();
        let task = produce_invalid_contract(&mut generator, &compiler, 1).unwrap();
        assert_eq!(task.from_line, 1);
        assert_eq!(task.to_line, 4); // 3 lines of source
    }
}
