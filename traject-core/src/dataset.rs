//! Transition accumulation and dataset finalization.
use crate::error::TrajectError;
use crate::npy;
use crate::{Act, Obs};
use anyhow::{Context, Result};
use log::info;
use ndarray::Array2;
use std::path::Path;

/// Accumulates aligned transition rows across episodes.
///
/// The three row sequences `now_state`, `next_state` and `action` grow in
/// lockstep, one validated episode at a time: row `k` of each sequence
/// belongs to the `k`-th transition in global episode order. The
/// accumulator is owned by whoever drives the rollout and passed into
/// merge calls explicitly; there is no ambient state.
#[derive(Debug, Default)]
pub struct TransitionSet {
    now_state: Vec<Vec<f32>>,
    next_state: Vec<Vec<f32>>,
    action: Vec<Vec<f32>>,
}

impl TransitionSet {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of accumulated transitions.
    pub fn len(&self) -> usize {
        self.now_state.len()
    }

    /// Whether no transitions have been accumulated yet.
    pub fn is_empty(&self) -> bool {
        self.now_state.is_empty()
    }

    /// Folds one finished episode into the accumulator.
    ///
    /// `observations` must hold exactly one more element than `actions`.
    /// A malformed episode is rejected as a whole: the error is returned
    /// before any row is appended, so the accumulator never holds a
    /// partial episode.
    pub fn merge<O: Obs, A: Act>(
        &mut self,
        observations: Vec<O>,
        actions: Vec<A>,
    ) -> Result<(), TrajectError> {
        if observations.len() != actions.len() + 1 {
            return Err(TrajectError::MalformedEpisode {
                n_obs: observations.len(),
                n_act: actions.len(),
            });
        }

        let t = actions.len();
        self.now_state
            .extend(observations[..t].iter().map(Obs::to_vec));
        self.next_state
            .extend(observations[1..].iter().map(Obs::to_vec));
        self.action.extend(actions.iter().map(Act::to_vec));

        Ok(())
    }

    /// Validates alignment and stacks the rows into rectangular arrays.
    ///
    /// Row-count equality across the three sequences and a uniform row
    /// width within each are checked before anything is built; violations
    /// are fatal and nothing is persisted. An empty accumulator is also
    /// fatal, as the feature width of the arrays would be undeterminable.
    pub fn finalize(self) -> Result<Dataset, TrajectError> {
        let (now, next, act) = (
            self.now_state.len(),
            self.next_state.len(),
            self.action.len(),
        );
        if now != next || now != act {
            return Err(TrajectError::RowCountMismatch { now, next, act });
        }
        if now == 0 {
            return Err(TrajectError::EmptyDataset);
        }

        Ok(Dataset {
            now_state: stack_rows(self.now_state)?,
            next_state: stack_rows(self.next_state)?,
            action: stack_rows(self.action)?,
        })
    }
}

fn stack_rows(rows: Vec<Vec<f32>>) -> Result<Array2<f32>, TrajectError> {
    let n = rows.len();
    let width = rows[0].len();
    let mut flat = Vec::with_capacity(n * width);
    for (row, values) in rows.into_iter().enumerate() {
        if values.len() != width {
            return Err(TrajectError::RowWidthMismatch {
                expected: width,
                got: values.len(),
                row,
            });
        }
        flat.extend(values);
    }

    Ok(Array2::from_shape_vec((n, width), flat).expect("rows are width-checked"))
}

/// A finalized, shape-checked transition dataset.
#[derive(Debug)]
pub struct Dataset {
    now_state: Array2<f32>,
    next_state: Array2<f32>,
    action: Array2<f32>,
}

impl Dataset {
    /// Number of transition rows.
    pub fn len(&self) -> usize {
        self.now_state.nrows()
    }

    /// Whether the dataset holds no rows. Finalization rejects empty
    /// accumulators, so this is false for any dataset it produces.
    pub fn is_empty(&self) -> bool {
        self.now_state.nrows() == 0
    }

    /// States at time `t`, one row per transition.
    pub fn now_state(&self) -> &Array2<f32> {
        &self.now_state
    }

    /// States at time `t + 1`, row-aligned with [`Dataset::now_state`].
    pub fn next_state(&self) -> &Array2<f32> {
        &self.next_state
    }

    /// Actions between the paired states, row-aligned with the others.
    pub fn action(&self) -> &Array2<f32> {
        &self.action
    }

    /// Writes the three arrays into `dir` as `.npy` files.
    pub fn save(&self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir).with_context(|| format!("cannot create {:?}", dir))?;
        npy::write(dir.join("now_state.npy"), &self.now_state)?;
        npy::write(dir.join("next_state.npy"), &self.next_state)?;
        npy::write(dir.join("action.npy"), &self.action)?;
        info!("Saved {} transitions to {:?}", self.len(), dir);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array1;

    fn obs(values: &[f32]) -> Array1<f32> {
        Array1::from(values.to_vec())
    }

    #[test]
    fn merge_appends_aligned_rows() {
        let mut set = TransitionSet::new();
        let observations = vec![obs(&[0.0, 0.1]), obs(&[1.0, 1.1]), obs(&[2.0, 2.1])];
        let actions = vec![obs(&[10.0]), obs(&[11.0])];
        set.merge(observations, actions).unwrap();

        assert_eq!(set.len(), 2);
        let dataset = set.finalize().unwrap();
        assert_eq!(dataset.now_state().row(0).to_vec(), vec![0.0, 0.1]);
        assert_eq!(dataset.next_state().row(0).to_vec(), vec![1.0, 1.1]);
        assert_eq!(dataset.now_state().row(1).to_vec(), vec![1.0, 1.1]);
        assert_eq!(dataset.next_state().row(1).to_vec(), vec![2.0, 2.1]);
        assert_eq!(dataset.action().row(1).to_vec(), vec![11.0]);
    }

    #[test]
    fn malformed_episode_is_rejected_and_leaves_set_unchanged() {
        let mut set = TransitionSet::new();
        set.merge(
            vec![obs(&[0.0]), obs(&[1.0])],
            vec![obs(&[0.5])],
        )
        .unwrap();

        let err = set
            .merge(vec![obs(&[2.0]), obs(&[3.0])], vec![obs(&[0.1]), obs(&[0.2])])
            .unwrap_err();
        assert!(matches!(
            err,
            TrajectError::MalformedEpisode { n_obs: 2, n_act: 2 }
        ));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn zero_step_episode_merges_nothing() {
        let mut set = TransitionSet::new();
        set.merge::<Array1<f32>, Array1<f32>>(vec![obs(&[0.0])], vec![])
            .unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn finalize_rejects_unequal_row_counts() {
        let mut set = TransitionSet::new();
        set.merge(
            vec![obs(&[0.0]), obs(&[1.0])],
            vec![obs(&[0.5])],
        )
        .unwrap();
        // Corrupt the accumulator the way a buggy caller would: one extra
        // action row without matching states.
        set.action.push(vec![9.0]);

        let err = set.finalize().unwrap_err();
        assert!(matches!(
            err,
            TrajectError::RowCountMismatch {
                now: 1,
                next: 1,
                act: 2
            }
        ));
    }

    #[test]
    fn finalize_rejects_empty_accumulator() {
        let err = TransitionSet::new().finalize().unwrap_err();
        assert!(matches!(err, TrajectError::EmptyDataset));
    }

    #[test]
    fn finalize_rejects_ragged_rows() {
        let mut set = TransitionSet::new();
        set.merge(
            vec![obs(&[0.0, 0.1]), obs(&[1.0, 1.1])],
            vec![obs(&[0.5])],
        )
        .unwrap();
        set.merge(vec![obs(&[0.0]), obs(&[1.0])], vec![obs(&[0.5])])
            .unwrap();

        let err = set.finalize().unwrap_err();
        assert!(matches!(
            err,
            TrajectError::RowWidthMismatch {
                expected: 2,
                got: 1,
                row: 1
            }
        ));
    }

    #[test]
    fn save_writes_three_aligned_files() {
        use tempdir::TempDir;

        let mut set = TransitionSet::new();
        set.merge(
            vec![obs(&[0.0, 0.1]), obs(&[1.0, 1.1])],
            vec![obs(&[0.5])],
        )
        .unwrap();
        let dataset = set.finalize().unwrap();

        let dir = TempDir::new("dataset").unwrap();
        dataset.save(dir.path()).unwrap();

        let now = crate::npy::read(dir.path().join("now_state.npy")).unwrap();
        let next = crate::npy::read(dir.path().join("next_state.npy")).unwrap();
        let action = crate::npy::read(dir.path().join("action.npy")).unwrap();
        assert_eq!(now.nrows(), 1);
        assert_eq!(next.nrows(), 1);
        assert_eq!(action.nrows(), 1);
        assert_eq!(now.row(0).to_vec(), vec![0.0, 0.1]);
        assert_eq!(next.row(0).to_vec(), vec![1.0, 1.1]);
    }
}
