use aoc_solver::{
    AocSolver, AutoRegisterSolver, ParseError, PartSolver, PuzzleParser, RegistryBuilder,
    SolveError,
};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2016, day = 4, tags = ["macro-test", "words"])]
pub struct WordCount;

impl PuzzleParser for WordCount {
    type Puzzle<'a> = &'a str;

    fn parse(input: &str) -> Result<&str, ParseError> {
        Ok(input)
    }
}

impl PartSolver<1> for WordCount {
    fn solve(input: &mut &str) -> Result<String, SolveError> {
        Ok(input.split_whitespace().count().to_string())
    }
}

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2016, day = 5)]
pub struct Untagged;

impl PuzzleParser for Untagged {
    type Puzzle<'a> = usize;

    fn parse(input: &str) -> Result<usize, ParseError> {
        Ok(input.len())
    }
}

impl PartSolver<1> for Untagged {
    fn solve(len: &mut usize) -> Result<String, SolveError> {
        Ok(len.to_string())
    }
}

impl PartSolver<2> for Untagged {
    fn solve(len: &mut usize) -> Result<String, SolveError> {
        Ok((*len * 2).to_string())
    }
}

#[test]
fn test_plugins_are_submitted() {
    let plugins: Vec<_> = aoc_solver::inventory::iter::<aoc_solver::SolverPlugin>()
        .map(|p| (p.year, p.day, p.tags, p.solver.parts()))
        .collect();

    assert!(plugins.contains(&(2016, 4, &["macro-test", "words"][..], 1)));
    assert!(plugins.contains(&(2016, 5, &[][..], 2)));
}

#[test]
fn test_register_all_plugins() {
    let registry = RegistryBuilder::new().register_all_plugins().unwrap().build();

    let mut solver = registry.create_solver(2016, 4, "one two three").unwrap();
    assert_eq!(solver.solve(1).unwrap().answer, "3");

    let mut solver = registry.create_solver(2016, 5, "abcd").unwrap();
    assert_eq!(solver.solve(2).unwrap().answer, "8");
}

#[test]
fn test_tag_filter() {
    let registry = RegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.tags.contains(&"macro-test"))
        .unwrap()
        .build();

    assert_eq!(registry.len(), 1);
    let info = registry.get_info(2016, 4).unwrap();
    assert_eq!(info.tags, &["macro-test", "words"]);
    assert!(!registry.contains(2016, 5));
}
