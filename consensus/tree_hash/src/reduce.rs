use crate::{Error, Merkleizer};
use ethereum_hashing::{Chunk, PairHasher};
use rayon::prelude::*;
use slog::{debug, error};

/// A contiguous run of input pairs and the output slots they hash into.
type Group<'a> = (&'a [Chunk], &'a mut [Chunk]);

impl<H: PairHasher> Merkleizer<H> {
    /// Hashes each adjacent pair of `chunks`, returning `chunks.len() / 2` parent chunks.
    ///
    /// Inputs of at least `parallelization_threshold` chunks are split across the configured
    /// number of workers.
    pub fn reduce(&self, chunks: &[Chunk]) -> Result<Vec<Chunk>, Error> {
        self.reduce_with_workers(chunks, self.config.effective_workers())
    }

    /// As `reduce`, but with an explicit worker count. A count of `0` always hashes on the calling
    /// thread.
    ///
    /// The output is identical for every worker count.
    pub fn reduce_with_workers(
        &self,
        chunks: &[Chunk],
        workers: usize,
    ) -> Result<Vec<Chunk>, Error> {
        if chunks.len() % 2 != 0 {
            return Err(Error::OddChunkCount { len: chunks.len() });
        }

        let mut output = vec![[0; 32]; chunks.len() / 2];

        if workers == 0 || chunks.len() < self.config.parallelization_threshold {
            self.hasher.hash_pairs(&mut output, chunks)?;
        } else {
            self.reduce_parallel(chunks, &mut output, workers)?;
        }

        Ok(output)
    }

    fn reduce_parallel(
        &self,
        input: &[Chunk],
        output: &mut [Chunk],
        workers: usize,
    ) -> Result<(), Error> {
        let groups = partition(input, output, workers);

        debug!(
            self.log,
            "Reducing chunks in parallel";
            "chunks" => input.len(),
            "workers" => groups.len(),
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(groups.len())
            .build()
            .map_err(|e| Error::ThreadPool(e.to_string()))?;

        let hasher = &self.hasher;
        let errors: Vec<Error> = pool.install(|| {
            groups
                .into_par_iter()
                .filter_map(|(input, output)| hasher.hash_pairs(output, input).err())
                .map(Error::from)
                .collect()
        });

        if errors.is_empty() {
            Ok(())
        } else {
            error!(
                self.log,
                "Parallel reduction failed";
                "failed_workers" => errors.len(),
                "first_error" => ?errors[0],
            );
            Err(Error::Workers(errors))
        }
    }
}

/// Splits `input` into `workers` contiguous groups of pairs, each paired with the disjoint slice
/// of `output` it writes to. The last group absorbs the remainder.
fn partition<'a>(input: &'a [Chunk], output: &'a mut [Chunk], workers: usize) -> Vec<Group<'a>> {
    let pairs = input.len() / 2;
    let workers = workers.clamp(1, pairs.max(1));
    let group_size = pairs / workers;

    let mut groups = Vec::with_capacity(workers);
    let mut input = input;
    let mut output = output;

    for i in 0..workers {
        let group_pairs = if i + 1 == workers {
            output.len()
        } else {
            group_size
        };

        let (group_input, rest_input) = input.split_at(group_pairs * 2);
        let (group_output, rest_output) = std::mem::take(&mut output).split_at_mut(group_pairs);

        groups.push((group_input, group_output));
        input = rest_input;
        output = rest_output;
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MerkleizerConfig;
    use ethereum_hashing::{Error as HashError, Sha2PairHasher};
    use quickcheck::TestResult;
    use quickcheck_macros::quickcheck;
    use slog::{o, Logger};

    fn chunks(n: usize) -> Vec<Chunk> {
        (0..n)
            .map(|i| {
                let mut chunk = [0; 32];
                chunk[0..8].copy_from_slice(&(i as u64).to_le_bytes());
                chunk
            })
            .collect()
    }

    fn merkleizer_with_threshold(threshold: usize) -> Merkleizer {
        let config = MerkleizerConfig {
            parallelization_threshold: threshold,
            workers: None,
        };
        Merkleizer::new(Sha2PairHasher, config, Logger::root(slog::Discard, o!())).unwrap()
    }

    #[test]
    fn odd_length_rejected() {
        let merkleizer: Merkleizer = Merkleizer::default();
        assert_eq!(
            merkleizer.reduce(&chunks(3)),
            Err(Error::OddChunkCount { len: 3 })
        );
        assert_eq!(merkleizer.reduce(&[]), Ok(vec![]));
    }

    #[test]
    fn above_default_threshold() {
        let merkleizer: Merkleizer = Merkleizer::default();
        let input = chunks(10_002);

        let sequential = merkleizer.reduce_with_workers(&input, 0).unwrap();
        for workers in [1, 2, 3, 7, 64] {
            assert_eq!(
                merkleizer.reduce_with_workers(&input, workers).unwrap(),
                sequential,
                "{} workers",
                workers
            );
        }
        assert_eq!(sequential.len(), 5_001);
    }

    #[test]
    fn partition_is_contiguous_and_disjoint() {
        let input = chunks(22);
        let mut output = vec![[0; 32]; 11];

        let groups = partition(&input, &mut output, 3);
        let sizes = groups
            .iter()
            .map(|(input, output)| (input.len(), output.len()))
            .collect::<Vec<_>>();

        assert_eq!(sizes, vec![(6, 3), (6, 3), (10, 5)]);
        assert_eq!(groups[1].0[0], input[6]);
        assert_eq!(groups[2].0[0], input[12]);
    }

    #[test]
    fn more_workers_than_pairs() {
        let input = chunks(4);
        let mut output = vec![[0; 32]; 2];

        let groups = partition(&input, &mut output, 16);
        assert_eq!(groups.len(), 2);
    }

    struct FailingHasher;

    impl PairHasher for FailingHasher {
        fn hash_pairs(&self, _output: &mut [Chunk], input: &[Chunk]) -> Result<(), HashError> {
            Err(HashError::OddInputLength { len: input.len() })
        }
    }

    #[test]
    fn all_worker_errors_are_collected() {
        let config = MerkleizerConfig {
            parallelization_threshold: 2,
            workers: Some(3),
        };
        let merkleizer =
            Merkleizer::new(FailingHasher, config, Logger::root(slog::Discard, o!())).unwrap();

        match merkleizer.reduce(&chunks(12)) {
            Err(Error::Workers(errors)) => {
                assert_eq!(errors.len(), 3);
                assert!(errors
                    .iter()
                    .all(|e| matches!(e, Error::Hasher(HashError::OddInputLength { .. }))));
            }
            other => panic!("expected worker errors, got {:?}", other),
        }
    }

    #[quickcheck]
    fn worker_count_does_not_change_output(pairs: u8, workers: u8) -> TestResult {
        if pairs == 0 {
            return TestResult::discard();
        }

        let merkleizer = merkleizer_with_threshold(2);
        let input = chunks(pairs as usize * 2);

        let sequential = merkleizer.reduce_with_workers(&input, 0).unwrap();
        let single = merkleizer.reduce_with_workers(&input, 1).unwrap();
        let parallel = merkleizer
            .reduce_with_workers(&input, workers as usize % 17 + 1)
            .unwrap();

        TestResult::from_bool(
            sequential.len() == pairs as usize && sequential == single && single == parallel,
        )
    }
}
