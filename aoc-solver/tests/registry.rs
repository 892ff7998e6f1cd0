use aoc_solver::{
    AocSolver, FactoryInfo, ParseError, PartSolver, PuzzleParser, RegistrationError,
    RegistryBuilder, SolveError, SolverError,
};

/// Running total of the input numbers, cached by part 1 for part 2
struct Totals {
    numbers: Vec<i64>,
    sum: Option<i64>,
}

#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct SumThenMean;

impl PuzzleParser for SumThenMean {
    type Puzzle<'a> = Totals;

    fn parse(input: &str) -> Result<Totals, ParseError> {
        let numbers = input
            .lines()
            .map(|line| {
                line.trim()
                    .parse::<i64>()
                    .map_err(|_| ParseError::InvalidFormat(format!("expected integer, got {line:?}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if numbers.is_empty() {
            return Err(ParseError::MissingData("no numbers".into()));
        }
        Ok(Totals { numbers, sum: None })
    }
}

impl PartSolver<1> for SumThenMean {
    fn solve(totals: &mut Totals) -> Result<String, SolveError> {
        let sum = totals.numbers.iter().sum::<i64>();
        totals.sum = Some(sum);
        Ok(sum.to_string())
    }
}

impl PartSolver<2> for SumThenMean {
    fn solve(totals: &mut Totals) -> Result<String, SolveError> {
        let sum = totals
            .sum
            .unwrap_or_else(|| totals.numbers.iter().sum::<i64>());
        Ok((sum / totals.numbers.len() as i64).to_string())
    }
}

/// Borrows the input as-is
#[derive(AocSolver)]
#[aoc_solver(max_parts = 1)]
struct LineCount;

impl PuzzleParser for LineCount {
    type Puzzle<'a> = &'a str;

    fn parse(input: &str) -> Result<&str, ParseError> {
        Ok(input)
    }
}

impl PartSolver<1> for LineCount {
    fn solve(input: &mut &str) -> Result<String, SolveError> {
        Ok(input.lines().count().to_string())
    }
}

fn registry() -> aoc_solver::SolverRegistry {
    RegistryBuilder::new()
        .register_solver::<LineCount>(2021, 3, &["text"])
        .unwrap()
        .register_solver::<SumThenMean>(2020, 9, &["numbers", "cached"])
        .unwrap()
        .build()
}

#[test]
fn test_create_and_solve_both_parts() {
    let registry = registry();
    let mut solver = registry.create_solver(2020, 9, "2\n4\n9").unwrap();

    assert_eq!(solver.year(), 2020);
    assert_eq!(solver.day(), 9);
    assert_eq!(solver.parts(), 2);
    assert!(solver.parse_end() >= solver.parse_start());

    let part1 = solver.solve(1).unwrap();
    assert_eq!(part1.part, 1);
    assert_eq!(part1.answer, "15");
    assert!(part1.duration().num_microseconds().unwrap() >= 0);

    assert_eq!(solver.solve(2).unwrap().answer, "5");
}

#[test]
fn test_part_two_without_part_one() {
    let registry = registry();
    let mut solver = registry.create_solver(2020, 9, "10\n20").unwrap();
    assert_eq!(solver.solve(2).unwrap().answer, "15");
}

#[test]
fn test_borrowed_puzzle() {
    let registry = registry();
    let input = String::from("a\nb\nc\n");
    let mut solver = registry.create_solver(2021, 3, &input).unwrap();
    assert_eq!(solver.solve(1).unwrap().answer, "3");
}

#[test]
fn test_part_out_of_range() {
    let registry = registry();
    let mut solver = registry.create_solver(2021, 3, "x").unwrap();
    assert!(matches!(solver.solve(0), Err(SolveError::PartOutOfRange(0))));
    assert!(matches!(solver.solve(2), Err(SolveError::PartOutOfRange(2))));
}

#[test]
fn test_parse_error_propagates() {
    let registry = registry();
    match registry.create_solver(2020, 9, "1\nseven") {
        Err(SolverError::ParseError(ParseError::InvalidFormat(message))) => {
            assert!(message.contains("seven"))
        }
        Err(other) => panic!("expected InvalidFormat, got {other}"),
        Ok(_) => panic!("expected parse failure"),
    }
    assert!(matches!(
        registry.create_solver(2020, 9, ""),
        Err(SolverError::ParseError(ParseError::MissingData(_)))
    ));
}

#[test]
fn test_unknown_days() {
    let registry = registry();
    assert!(matches!(
        registry.create_solver(2020, 10, ""),
        Err(SolverError::NotFound(2020, 10))
    ));
    assert!(matches!(
        registry.create_solver(2020, 26, ""),
        Err(SolverError::InvalidYearDay(2020, 26))
    ));
    assert!(matches!(
        registry.create_solver(1999, 1, ""),
        Err(SolverError::InvalidYearDay(1999, 1))
    ));
}

#[test]
fn test_duplicate_registration_rejected() {
    let result = RegistryBuilder::new()
        .register_solver::<LineCount>(2020, 1, &[])
        .unwrap()
        .register_solver::<SumThenMean>(2020, 1, &[]);
    assert_eq!(result.err(), Some(RegistrationError::DuplicateSolver(2020, 1)));
}

#[test]
fn test_invalid_registration_rejected() {
    let result = RegistryBuilder::new().register_solver::<LineCount>(2020, 0, &[]);
    assert_eq!(result.err(), Some(RegistrationError::InvalidYearDay(2020, 0)));
}

#[test]
fn test_info_ordered_by_year_then_day() {
    let registry = registry();
    let info: Vec<FactoryInfo> = registry.iter_info().collect();
    assert_eq!(
        info,
        vec![
            FactoryInfo {
                year: 2020,
                day: 9,
                parts: 2,
                tags: &["numbers", "cached"],
            },
            FactoryInfo {
                year: 2021,
                day: 3,
                parts: 1,
                tags: &["text"],
            },
        ]
    );
    assert_eq!(registry.len(), 2);
    assert!(registry.contains(2021, 3));
    assert!(!registry.contains(2021, 4));
    assert_eq!(registry.get_info(2020, 9).map(|i| i.parts), Some(2));
    assert!(RegistryBuilder::new().build().is_empty());
}
