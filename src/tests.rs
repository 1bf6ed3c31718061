#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use strum::VariantArray;

    use crate::builder::{PipeBuilder, PipeInvalidReason};
    use crate::frontier::{dominates, Frontier, FrontierConfig, FrontierMaintainer, Outcome};
    use crate::graph::Defect;
    use crate::location::Location;
    use crate::pipe::reconstruct;
    use crate::records::{Category, Platform, RecordBook};
    use crate::score::{Candidate, Score, ScoreField};
    use crate::search::{PipeFailure, SearchBudget};
    use crate::seeds::{SeedLookupError, SeedTable, SeedTableError};
    use crate::shape::{is_contiguous, SquareStep};

    fn locations(cells: &[(i32, i32)]) -> Vec<Location> {
        cells.iter().copied().map(Location::from).collect_vec()
    }

    /// Cells visited stepping from `start` by `L`, `U`, `D` and `R` moves.
    fn walk(start: Location, moves: &str) -> Vec<Location> {
        let mut path = vec![start];
        for step in moves.chars() {
            let step = match step {
                'L' => SquareStep::Left,
                'U' => SquareStep::Up,
                'D' => SquareStep::Down,
                _ => SquareStep::Right,
            };
            path.push(step.attempt_from(*path.last().unwrap()));
        }
        path
    }

    fn assert_orders(cells: &[Location], seed: Location, path: &[Location]) {
        assert_eq!(path.len(), cells.len());
        assert_eq!(path[0], seed);
        assert!(is_contiguous(path));
        assert_eq!(path.iter().sorted().collect_vec(), cells.iter().sorted().collect_vec());
    }

    #[test]
    fn straight_with_turn() {
        let cells = locations(&[(0, 0), (1, 0), (2, 0), (2, 1)]);

        assert_eq!(reconstruct(cells, Location(0, 0)).unwrap(), locations(&[(0, 0), (1, 0), (2, 0), (2, 1)]));
    }

    #[test]
    fn either_end_may_seed() {
        let cells = locations(&[(0, 0), (1, 0), (2, 0)]);

        assert_eq!(reconstruct(cells.clone(), Location(0, 0)).unwrap(), locations(&[(0, 0), (1, 0), (2, 0)]));
        assert_eq!(reconstruct(cells, Location(2, 0)).unwrap(), locations(&[(2, 0), (1, 0), (0, 0)]));
    }

    #[test]
    fn single_cell() {
        assert_eq!(reconstruct(locations(&[(3, 3)]), Location(3, 3)).unwrap(), locations(&[(3, 3)]));
    }

    #[test]
    fn snake() {
        // three runs joined at alternating ends, shuffled
        let snake = (0..6).map(|x| Location(x, 0))
            .chain([Location(5, 1)])
            .chain((0..6).rev().map(|x| Location(x, 2)))
            .chain([Location(0, 3)])
            .chain((0..6).map(|x| Location(x, 4)))
            .collect_vec();
        let shuffled = snake.iter().copied().sorted_by_key(|l| (l.1 * 7 + l.0 * 3) % 11).collect_vec();

        assert_eq!(reconstruct(shuffled.clone(), Location(0, 0)).unwrap(), snake);
        assert_eq!(reconstruct(shuffled, Location(5, 4)).unwrap(), snake.into_iter().rev().collect_vec());
    }

    #[test]
    fn loop_broken_at_seed() {
        // ring around (1, 1); no cell has a single neighbour
        let ring = locations(&[(0, 0), (1, 0), (2, 0), (2, 1), (2, 2), (1, 2), (0, 2), (0, 1)]);

        let path = reconstruct(ring.clone(), Location(0, 0)).unwrap();
        assert_orders(&ring, Location(0, 0), &path);
        // down is tried before right
        assert_eq!(path, locations(&[(0, 0), (0, 1), (0, 2), (1, 2), (2, 2), (2, 1), (2, 0), (1, 0)]));
    }

    #[test]
    fn negative_coordinates() {
        let cells = locations(&[(-1, 0), (0, 0), (1, 0), (1, -1), (1, -2), (0, -2)]);

        let path = reconstruct(cells.clone(), Location(0, -2)).unwrap();
        assert_eq!(path, locations(&[(0, -2), (1, -2), (1, -1), (1, 0), (0, 0), (-1, 0)]));
        assert_orders(&cells, Location(0, -2), &path);
    }

    #[test]
    fn backtracks_out_of_wrong_turn() {
        let cells = locations(&[(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2), (2, 0), (2, 1), (3, 0), (3, 1)]);

        let path = reconstruct(cells.clone(), Location(0, 1)).unwrap();
        assert_orders(&cells, Location(0, 1), &path);
        assert_eq!(path, locations(&[(0, 1), (0, 0), (1, 0), (2, 0), (3, 0), (3, 1), (2, 1), (1, 1), (1, 2), (0, 2)]));
    }

    #[test]
    fn input_order_does_not_matter() {
        let cells = locations(&[(0, 0), (0, 1), (0, 2), (1, 2), (2, 2), (2, 1)]);
        let expected = reconstruct(cells.clone(), Location(0, 0)).unwrap();
        assert_orders(&cells, Location(0, 0), &expected);

        for permutation in cells.iter().copied().permutations(cells.len()) {
            assert_eq!(reconstruct(permutation, Location(0, 0)).unwrap(), expected);
        }

        let ring = locations(&[(0, 0), (1, 0), (1, 1), (0, 1)]);
        let expected = reconstruct(ring.clone(), Location(1, 1)).unwrap();
        for permutation in ring.iter().copied().permutations(ring.len()) {
            assert_eq!(reconstruct(permutation, Location(1, 1)).unwrap(), expected);
        }
    }

    #[test]
    fn duplicates_collapse() {
        let cells = locations(&[(0, 0), (1, 0), (1, 0), (2, 0), (0, 0)]);

        assert_eq!(reconstruct(cells, Location(0, 0)).unwrap(), locations(&[(0, 0), (1, 0), (2, 0)]));
    }

    #[test]
    fn seed_not_found() {
        let failure = reconstruct(locations(&[(0, 0), (1, 0)]), Location(3, 3)).unwrap_err();

        assert_eq!(failure, PipeFailure::SeedNotFound { seed: Location(3, 3) });
        assert!(failure.partial().is_empty());
    }

    #[test]
    fn branching_is_incomplete() {
        let cells = locations(&[(0, 0), (1, 0), (2, 0), (1, 1)]);

        let failure = reconstruct(cells, Location(0, 0)).unwrap_err();
        assert_eq!(failure, PipeFailure::Incomplete {
            partial: locations(&[(0, 0), (1, 0), (2, 0)]),
            missing: 1,
            defect: Some(Defect::Branching { at: Location(1, 0), degree: 3 }),
        });
        assert_eq!(failure.to_string(), "incomplete piping (3, 1)");
    }

    #[test]
    fn disconnected_keeps_what_meets() {
        let cells = locations(&[(0, 0), (1, 0), (5, 5)]);

        let failure = reconstruct(cells, Location(0, 0)).unwrap_err();
        assert_eq!(failure, PipeFailure::Incomplete {
            partial: locations(&[(0, 0), (1, 0)]),
            missing: 1,
            defect: Some(Defect::Disconnected { components: 2 }),
        });
    }

    #[test]
    fn adjacency_does_not_wrap() {
        // 31 and -24 are the two edges of the window
        let cells = locations(&[(30, 0), (31, 0), (-24, 0)]);

        let failure = reconstruct(cells, Location(30, 0)).unwrap_err();
        assert_eq!(failure.partial(), locations(&[(30, 0), (31, 0)]).as_slice());
        assert!(matches!(failure, PipeFailure::Incomplete { missing: 1, defect: Some(Defect::Disconnected { components: 2 }), .. }));
    }

    #[test]
    fn tiny_budget_gives_up() {
        let mut builder = PipeBuilder::new();
        builder.add_cells(locations(&[(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2), (2, 0), (2, 1), (3, 0), (3, 1)]))
            .seed(Location(0, 1));
        let pipe = builder.build().unwrap();

        let budget = SearchBudget::default().with_single_pass(1).with_rounds(1).with_round_step(1);
        let failure = pipe.reconstruct(&budget).unwrap_err();
        assert_eq!(failure, PipeFailure::Incomplete {
            partial: locations(&[(0, 1)]),
            missing: 9,
            defect: Some(Defect::Branching { at: Location(0, 1), degree: 3 }),
        });

        // the default budget finds it
        assert!(pipe.reconstruct(&SearchBudget::default()).is_ok());
    }

    #[test]
    fn later_round_retries_after_unwinding() {
        let cells = walk(Location(0, 0), "RULLDDRRRRURRDLDDLULDLULDDRRDLDDLUULULL");
        let mut builder = PipeBuilder::new();
        builder.add_cells(cells.clone()).seed(Location(0, 0));
        let pipe = builder.build().unwrap();

        // the first round's forward pass exhausts its budget and is rolled back to the seed
        let failure = pipe.reconstruct(&SearchBudget::default().with_rounds(1)).unwrap_err();
        assert_eq!(failure, PipeFailure::Incomplete {
            partial: locations(&[(0, 0)]),
            missing: 39,
            defect: Some(Defect::Branching { at: Location(-1, 0), degree: 3 }),
        });

        // the unwound cells are open again for the second round
        let path = pipe.reconstruct(&SearchBudget::default()).unwrap();
        assert_orders(&cells, Location(0, 0), &path);
        assert_eq!(path, walk(Location(0, 0), "RULLDDRDDDRUUURDRUURRDLDDLLDDLDDLUULULL"));
        assert_eq!(pipe.reconstruct(&SearchBudget::default().with_rounds(2)), Ok(path));
    }

    #[test]
    fn builder_rejects() {
        let mut builder = PipeBuilder::new();
        builder.add_cell(Location(0, 0));
        assert_eq!(builder.build().unwrap_err(), &vec![PipeInvalidReason::NoSeed]);

        let mut builder = PipeBuilder::new();
        builder.add_cell(Location(32, 0)).seed(Location(0, 0));
        assert_eq!(builder.is_valid(), Some(&vec![PipeInvalidReason::CellOutOfBounds]));

        assert_eq!(reconstruct(locations(&[(0, 0)]), Location(0, 41)).unwrap_err(), PipeFailure::Invalid(vec![PipeInvalidReason::SeedOutOfBounds]));
    }

    #[test]
    fn print_pipe() {
        let mut builder = PipeBuilder::new();
        builder.add_cells(locations(&[(0, 0), (1, 0), (1, 1)])).seed(Location(0, 0));
        let pipe = builder.build().unwrap();

        assert_eq!(format!("{}", pipe), format!("{0}sp{1}\n{0}.p{1}\n", ".".repeat(24), ".".repeat(30)));
    }

    #[test]
    fn seed_table() {
        let table: SeedTable = "type, output, x, y
drag-arbitrary-input, 0, 1, 1

drag-silo-output, 1, -2, 0
".parse().unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("drag-arbitrary-input", 0), Some(Location(1, 1)));
        assert_eq!(table.get("drag-silo-output", 1), Some(Location(-2, 0)));
        assert_eq!(table.get("drag-silo-output", 0), None);

        assert_eq!("type,x,y\n".parse::<SeedTable>().unwrap_err(), SeedTableError::MissingColumn("output"));
        assert!(matches!("x, y, type, output\n1, 2, a, z".parse::<SeedTable>(),
            Err(SeedTableError::BadNumber { line: 2, column: "output", .. })));
        assert!(matches!("type, output, x, y\na, 0, 1".parse::<SeedTable>(),
            Err(SeedTableError::ShortRow { line: 2, expected: 4, found: 3 })));
    }

    #[test]
    fn component_pipes() {
        let mut table = SeedTable::new();
        table.insert("input", 0, Location(1, 1)).insert("input", 1, Location(1, 2));

        let pipes = table.reconstruct_component("input", [
            (0, locations(&[(3, 1), (1, 1), (2, 1)])),
            (1, Vec::new()),
        ], &SearchBudget::default()).unwrap();
        assert_eq!(pipes.len(), 1);
        assert_eq!(pipes[0].port, 0);
        assert_eq!(pipes[0].result, Ok(locations(&[(1, 1), (2, 1), (3, 1)])));

        let missing = table.reconstruct_component("output", [(0, locations(&[(0, 0)]))], &SearchBudget::default());
        assert_eq!(missing.unwrap_err(), SeedLookupError::UnknownSeed { component_type: "output".to_owned(), port: 0 });
    }

    fn candidate(cycles: u32, reactors: u32, symbols: u32) -> Candidate {
        Candidate::new(Score::new(cycles, reactors, symbols), "someone")
    }

    #[test]
    fn plausibility() {
        assert!(Score::new(2, 1, 5).is_plausible());
        assert!(Score::new(3, 2, 640).is_plausible());
        assert!(!Score::new(10, 1, 4).is_plausible());
        assert!(!Score::new(10, 1, 321).is_plausible());
        assert!(!Score::new(1, 1, 10).is_plausible());
    }

    #[test]
    fn frontier_evicts_and_keeps() {
        let mut maintainer = FrontierMaintainer::default();

        assert_eq!(maintainer.consider("level", candidate(100, 2, 30)), Outcome::Inserted { evicted: 0 });
        assert_eq!(maintainer.consider("level", candidate(90, 2, 30)), Outcome::Inserted { evicted: 1 });
        assert_eq!(maintainer.consider("level", candidate(95, 3, 20)), Outcome::Inserted { evicted: 0 });

        let scores = maintainer.current_frontier(&"level").into_iter().map(|c| c.score).collect_vec();
        assert_eq!(scores, vec![Score::new(90, 2, 30), Score::new(95, 3, 20)]);
    }

    #[test]
    fn frontier_rejections() {
        let mut frontier = Frontier::new(FrontierConfig::default());
        frontier.consider(candidate(90, 2, 30).with_comment("first"));

        // an exact tie goes to the incumbent
        assert_eq!(frontier.consider(candidate(90, 2, 30).with_comment("second")), Outcome::Dominated);
        assert_eq!(frontier.consider(candidate(91, 2, 30)), Outcome::Dominated);
        assert_eq!(frontier.consider(candidate(90, 2, 3)), Outcome::Implausible);
        assert_eq!(frontier.members().len(), 1);
        assert_eq!(frontier.members()[0].comment.as_deref(), Some("first"));

        let mut lenient = Frontier::new(FrontierConfig::default().accept_implausible());
        assert_eq!(lenient.consider(candidate(90, 2, 3)), Outcome::Inserted { evicted: 0 });
    }

    #[test]
    fn frontier_levels_are_independent() {
        let maintainer: FrontierMaintainer<u32> = [
            (2, candidate(50, 1, 20)),
            (1, candidate(60, 1, 20)),
            (2, candidate(40, 1, 30)),
            (1, candidate(60, 1, 10)),
            (3, candidate(1, 1, 1)),
        ].into_iter().collect();

        assert_eq!(maintainer.levels().copied().collect_vec(), vec![1, 2]);
        assert_eq!(maintainer.current_frontier(&1).len(), 1);
        assert_eq!(maintainer.current_frontier(&2).len(), 2);
        assert!(maintainer.current_frontier(&3).is_empty());

        let frontiers = maintainer.into_frontiers().collect_vec();
        assert_eq!(frontiers[1].1[0].score, Score::new(40, 1, 30));
    }

    #[test]
    fn flags_split_the_frontier() {
        let mut bugged = candidate(40, 1, 20);
        bugged.score.bugged = true;
        let clean = candidate(50, 1, 20);

        let mut untracked = Frontier::new(FrontierConfig::default());
        untracked.consider(bugged.clone());
        assert_eq!(untracked.consider(clean.clone()), Outcome::Dominated);

        let mut tracked = Frontier::new(FrontierConfig::default().with_flags());
        tracked.consider(bugged);
        assert_eq!(tracked.consider(clean), Outcome::Inserted { evicted: 0 });
        assert_eq!(tracked.len(), 2);
    }

    #[test]
    fn frontier_properties() {
        let fields = [ScoreField::Cycles, ScoreField::Reactors, ScoreField::Symbols];
        let pool = [
            candidate(50, 1, 20),
            candidate(60, 1, 10),
            candidate(50, 2, 10),
            candidate(70, 1, 10),
            candidate(50, 1, 20),
            candidate(45, 2, 40),
        ];

        for order in pool.iter().cloned().permutations(pool.len()) {
            let mut frontier = Frontier::new(FrontierConfig::default());
            for candidate in order.iter().cloned() {
                frontier.consider(candidate);
            }
            let members = frontier.members().into_iter().cloned().collect_vec();

            for (a, b) in members.iter().tuple_combinations() {
                assert!(!dominates(&a.score, &b.score, &fields));
                assert!(!dominates(&b.score, &a.score, &fields));
            }
            for candidate in &order {
                assert!(members.iter().any(|member| dominates(&member.score, &candidate.score, &fields)));
            }

            for member in members.iter().cloned() {
                assert_eq!(frontier.consider(member), Outcome::Dominated);
            }
            assert_eq!(frontier.members().into_iter().cloned().collect_vec(), members);
            assert_eq!(members.len(), 4);
        }
    }

    #[test]
    fn records() {
        let mut book = RecordBook::new(true);
        let take = |book: &mut RecordBook, candidate: Candidate| book.insert(&candidate, Platform::Linux)
            .into_iter()
            .map(|key| key.category)
            .collect_vec();
        let reactors = vec![Category::LeastCyclesFewestReactors, Category::LeastSymbolsFewestReactors];

        assert_eq!(take(&mut book, candidate(50, 2, 20)), Category::VARIANTS.to_vec());
        assert_eq!(take(&mut book, candidate(40, 3, 30)), vec![Category::LeastCycles]);
        assert_eq!(take(&mut book, candidate(60, 1, 40)), reactors);
        assert_eq!(take(&mut book, candidate(60, 1, 30).with_uploaded("2013-08-15")), reactors);

        // on a full score tie a video wins, then the earlier upload
        assert!(take(&mut book, candidate(60, 1, 30).with_uploaded("2013-08-16")).is_empty());
        assert_eq!(take(&mut book, candidate(60, 1, 30).with_link("https://youtu.be/x")), reactors);
        assert!(book.get(Category::LeastSymbolsFewestReactors).is_some_and(|holder| holder.link.is_some()));

        assert_eq!(book.get(Category::LeastSymbols).map(|c| c.score), Some(Score::new(50, 2, 20)));
        assert_eq!(Category::LeastCyclesFewestReactors.to_string(), "Least Cycles - N Reactors");
        assert!(book.iter().all(|(key, _)| key.platform.is_none()));

        let mut research = RecordBook::new(false);
        research.insert(&candidate(50, 1, 20), Platform::Windows);
        assert_eq!(research.iter().map(|(key, _)| key.category).collect_vec(), vec![Category::LeastCycles, Category::LeastSymbols]);
        assert!(research.insert(&candidate(1, 1, 1), Platform::Windows).is_empty());
    }

    #[test]
    fn records_per_platform() {
        let mut book = RecordBook::new(true).per_platform();

        assert_eq!(book.insert(&candidate(50, 2, 20), Platform::Windows).len(), 4);
        // a worse score still takes every slot on a platform with no records yet
        assert_eq!(book.insert(&candidate(70, 2, 30), Platform::Linux).len(), 4);
        assert_eq!(
            book.insert(&candidate(60, 3, 20), Platform::Linux),
            vec![Category::LeastCycles.on(Platform::Linux), Category::LeastSymbols.on(Platform::Linux)],
        );

        assert!(book.get(Category::LeastCycles).is_none());
        assert_eq!(book.get(Category::LeastCycles.on(Platform::Windows)).map(|c| c.score), Some(Score::new(50, 2, 20)));
        assert_eq!(book.get(Category::LeastSymbols.on(Platform::Linux)).map(|c| c.score), Some(Score::new(60, 3, 20)));
        assert_eq!(book.get(Category::LeastSymbolsFewestReactors.on(Platform::Linux)).map(|c| c.score), Some(Score::new(70, 2, 30)));
        assert_eq!(book.iter().count(), 8);

        assert_eq!(Category::LeastSymbolsFewestReactors.on(Platform::Unknown).to_string(), "Least Symbols - Unknown OS - N Reactors");
        assert_eq!(Category::LeastCycles.on(Platform::Linux).to_string(), "Least Cycles - Linux");
        assert_eq!("Unknown OS".parse::<Platform>(), Ok(Platform::Unknown));
        assert_eq!("Windows".parse::<Platform>(), Ok(Platform::Windows));
    }
}
