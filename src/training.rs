//! Quiz scoring and training progress.
//!
//! Module and quiz content is supplied by the caller; this only decides
//! scores, pass/fail, which modules count as completed and which badges
//! that unlocks.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

pub const DEFAULT_PASS_MARK: u8 = 70;

pub type ModuleId = u32;

/// Percentage of questions answered correctly, rounded to the nearest whole.
/// Unanswered questions count as wrong. An empty quiz scores 0.
pub fn score_quiz(answers: &[Option<usize>], answer_key: &[usize]) -> u8 {
    if answer_key.is_empty() {
        return 0;
    }
    let correct = answer_key
        .iter()
        .enumerate()
        .filter(|(i, expected)| answers.get(*i).copied().flatten() == Some(**expected))
        .count();
    (correct as f64 / answer_key.len() as f64 * 100.0).round() as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum ModuleLevel {
    Beginner,
    Intermediate,
    Advanced,
}

/// Badges shown on the training page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter)]
pub enum Achievement {
    /// One module completed.
    #[strum(serialize = "First Steps")]
    FirstSteps,
    /// Three modules completed.
    #[strum(serialize = "Knowledge Seeker")]
    KnowledgeSeeker,
    /// Every offered module completed.
    #[strum(serialize = "Energy Expert")]
    EnergyExpert,
    /// 100% on any quiz.
    #[strum(serialize = "Perfect Score")]
    PerfectScore,
    /// Two advanced modules completed.
    #[strum(serialize = "Dedicated Learner")]
    DedicatedLearner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuizOutcome {
    pub score: u8,
    pub passed: bool,
    /// The module was not completed before this attempt.
    pub newly_completed: bool,
    pub perfect: bool,
}

/// Completed modules in the order they were first passed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingProgress {
    pub completed: Vec<ModuleId>,
    #[serde(default)]
    pub perfect_score: bool,
}

impl TrainingProgress {
    pub fn is_completed(&self, module: ModuleId) -> bool {
        self.completed.contains(&module)
    }

    pub fn record_attempt(&mut self, module: ModuleId, score: u8, pass_mark: u8) -> QuizOutcome {
        let passed = score >= pass_mark;
        let newly_completed = passed && !self.is_completed(module);
        if newly_completed {
            self.completed.push(module);
        }
        let perfect = passed && score == 100;
        if perfect {
            self.perfect_score = true;
        }
        QuizOutcome { score, passed, newly_completed, perfect }
    }

    /// A locked module opens once its prerequisite is completed.
    pub fn is_unlocked(&self, locked: bool, requires: Option<ModuleId>) -> bool {
        if !locked {
            return true;
        }
        requires.is_some_and(|m| self.is_completed(m))
    }

    pub fn progress_percent(&self, total_modules: usize) -> u8 {
        if total_modules == 0 {
            return 0;
        }
        let ratio = self.completed.len().min(total_modules) as f64 / total_modules as f64;
        (ratio * 100.0).round() as u8
    }

    pub fn all_completed(&self, total_modules: usize) -> bool {
        total_modules > 0 && self.completed.len() >= total_modules
    }

    /// Unlocked badges, in display order. `modules` is the offered catalogue.
    pub fn achievements(&self, modules: &[(ModuleId, ModuleLevel)]) -> Vec<Achievement> {
        let advanced = modules
            .iter()
            .filter(|(id, level)| *level == ModuleLevel::Advanced && self.is_completed(*id))
            .count();
        Achievement::iter()
            .filter(|badge| match badge {
                Achievement::FirstSteps => !self.completed.is_empty(),
                Achievement::KnowledgeSeeker => self.completed.len() >= 3,
                Achievement::EnergyExpert => self.all_completed(modules.len()),
                Achievement::PerfectScore => self.perfect_score,
                Achievement::DedicatedLearner => advanced >= 2,
            })
            .collect()
    }
}
