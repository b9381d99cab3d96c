//! Recursive binary subdivision into `2^num_levels` segments.

use std::collections::HashMap;

use rand::Rng;
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::cancel::CancellationToken;
use crate::config::BinarySegmenterConfig;
use crate::error::{ConfigError, InternalError, SegmentError};
use crate::geometry::Colour;
use crate::graph::DistanceOracle;
use crate::mesh::Mesh;
use crate::segment::binary::BinarySegmenter;
use crate::segment::palette::draw_colours;

/// Repeatedly binary-segments a mesh to produce `2^num_levels` segments.
///
/// Holds a work queue of face-index subsets, one binary split per queue
/// entry per level. Every level draws a fresh `2 * level` colour palette
/// from a single seeded stream shared across the whole run (colours and
/// the random distribution of "unsure" faces when dividing a sub-mesh by
/// colour both come from this one stream), so a given `(mesh, seed,
/// num_levels)` triple always segments identically.
#[derive(Debug, Clone)]
pub struct RecursiveSegmenter {
    num_levels: u32,
    seed: u64,
    binary_config: BinarySegmenterConfig,
}

impl RecursiveSegmenter {
    pub fn new(
        num_levels: u32,
        seed: u64,
        binary_config: BinarySegmenterConfig,
    ) -> Result<Self, SegmentError> {
        if num_levels == 0 {
            return Err(ConfigError::LevelsTooLow(num_levels).into());
        }
        Ok(Self {
            num_levels,
            seed,
            binary_config,
        })
    }

    /// Runs the full recursive subdivision and returns a coloured copy of
    /// `mesh`. The input mesh is never mutated.
    pub fn segment(
        &self,
        mesh: &Mesh,
        distances: &DistanceOracle,
        cancel: Option<&CancellationToken>,
    ) -> Result<Mesh, SegmentError> {
        let orig_num_faces = mesh.num_faces();
        let segmented = mesh.clone();
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);

        let mut stack: Vec<Vec<usize>> = vec![(0..orig_num_faces).collect()];
        let mut level: u32 = 0;
        let mut output: Vec<Vec<usize>> = Vec::new();

        while !stack.is_empty() {
            if let Some(token) = cancel {
                if token.is_cancelled() {
                    return Err(SegmentError::Cancelled);
                }
            }

            let colours = draw_colours(&mut rng, (level as usize + 1) * 2);
            output = Vec::with_capacity(stack.len());

            while let Some(subset) = stack.pop() {
                if let Some(token) = cancel {
                    if token.is_cancelled() {
                        return Err(SegmentError::Cancelled);
                    }
                }

                let idx = output.len();
                let config = BinarySegmenterConfig {
                    cluster_colours: (colours[idx * 2], colours[idx * 2 + 1]),
                    ..self.binary_config.clone()
                };
                BinarySegmenter::new(config).segment(&segmented, &subset, distances, cancel)?;
                output.push(subset);
            }

            level += 1;
            if level != self.num_levels {
                let mut next_stack = Vec::with_capacity(output.len() * 2);
                for subset in &output {
                    let (a, b) = divide_by_colour(&segmented, subset, &mut rng)?;
                    next_stack.push(a);
                    next_stack.push(b);
                }
                stack = next_stack;
            }
        }

        let actual: usize = output.iter().map(|s| s.len()).sum();
        if actual != orig_num_faces {
            return Err(InternalError::FaceCountMismatch {
                expected: orig_num_faces,
                actual,
            }
            .into());
        }

        Ok(segmented)
    }
}

/// Splits `subset` into two sub-lists by the two most common colours
/// among its faces, distributing faces of any other colour ("unsure"
/// boundary faces, or a colour from an earlier, now-superseded level)
/// uniformly at random between the two outputs.
fn divide_by_colour(
    mesh: &Mesh,
    subset: &[usize],
    rng: &mut ChaCha8Rng,
) -> Result<(Vec<usize>, Vec<usize>), SegmentError> {
    let mut counts: HashMap<Colour, usize> = HashMap::new();
    let mut first_seen: Vec<Colour> = Vec::new();
    for &idx in subset {
        let colour = mesh.faces()[idx].colour();
        if !counts.contains_key(&colour) {
            first_seen.push(colour);
        }
        *counts.entry(colour).or_insert(0) += 1;
    }

    if first_seen.len() < 2 {
        return Err(InternalError::InvariantViolation(format!(
            "sub-mesh of {} face(s) has only {} distinct colour(s); segment before dividing",
            subset.len(),
            first_seen.len()
        ))
        .into());
    }

    first_seen.sort_by(|a, b| counts[b].cmp(&counts[a]));
    let (colour_one, colour_two) = (first_seen[0], first_seen[1]);

    let mut out = (Vec::new(), Vec::new());
    for &idx in subset {
        let colour = mesh.faces()[idx].colour();
        if colour == colour_one {
            out.0.push(idx);
        } else if colour == colour_two {
            out.1.push(idx);
        } else if rng.gen_bool(0.5) {
            out.1.push(idx);
        } else {
            out.0.push(idx);
        }
    }

    Ok(out)
}
