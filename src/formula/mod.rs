pub mod dimacs;
pub mod text;

use std::fmt::{self, Display, Formatter};
use std::fs::File;
use std::path::Path;

/// Size of the variable namespace. Variables are indices in `0..MAX_VARIABLES`.
pub const MAX_VARIABLES: usize = 128;

#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, Debug)]
pub struct Variable(u8);

impl Variable {
    pub fn new(index: usize) -> Result<Self, VariableOutOfRange> {
        if index < MAX_VARIABLES {
            Ok(Self(index as u8))
        } else {
            Err(VariableOutOfRange { index })
        }
    }

    pub fn from_char(c: char) -> Result<Self, VariableOutOfRange> {
        Self::new(c as usize)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let c = self.0 as char;
        if c.is_ascii_alphabetic() {
            write!(f, "{}", c)
        } else {
            write!(f, "x{}", self.0)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableOutOfRange {
    pub index: usize,
}

impl Display for VariableOutOfRange {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "variable {} is outside the supported range 0..{}",
            self.index, MAX_VARIABLES
        )
    }
}

impl std::error::Error for VariableOutOfRange {}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Literal {
    Positive(Variable),
    Negative(Variable),
}

impl Literal {
    pub fn variable(&self) -> Variable {
        match self {
            Literal::Positive(v) => *v,
            Literal::Negative(v) => *v,
        }
    }

    pub fn is_positive(&self) -> bool {
        match self {
            Literal::Positive(_) => true,
            Literal::Negative(_) => false,
        }
    }

    pub fn negated(&self) -> Self {
        match self {
            Literal::Positive(v) => Literal::Negative(*v),
            Literal::Negative(v) => Literal::Positive(*v),
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Literal::Positive(v) => write!(f, "{}", v),
            Literal::Negative(v) => write!(f, "~{}", v),
        }
    }
}

/// A disjunction of literals. An empty clause is unsatisfiable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
    pub fn new(disjuncts: impl IntoIterator<Item = Literal>) -> Self {
        Self {
            literals: disjuncts.into_iter().collect(),
        }
    }

    pub fn literals(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let parens = self.literals.len() > 1;
        if parens {
            f.write_str("(")?;
        }
        let mut first_literal = true;
        for literal in &self.literals {
            if first_literal {
                first_literal = false;
            } else {
                f.write_str(" v ")?;
            }
            write!(f, "{}", literal)?;
        }
        if parens {
            f.write_str(")")?;
        }
        Ok(())
    }
}

/// A conjunction of clauses. An empty formula is trivially satisfied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Formula {
    clauses: Vec<Clause>,
}

impl Formula {
    pub fn new(conjuncts: impl IntoIterator<Item = Clause>) -> Self {
        Self {
            clauses: conjuncts.into_iter().collect(),
        }
    }

    pub fn clauses(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// Every variable mentioned by some literal of the formula.
    pub fn universe(&self) -> Universe {
        let mut universe = Universe::default();
        for clause in &self.clauses {
            for literal in &clause.literals {
                universe.insert(literal.variable());
            }
        }
        universe
    }
}

impl Display for Formula {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let mut first_clause = true;
        for clause in &self.clauses {
            if first_clause {
                first_clause = false;
            } else {
                f.write_str(" ^ ")?;
            }
            write!(f, "{}", clause)?;
        }
        Ok(())
    }
}

/// A set of variables, iterated in index order.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct Universe(u128);

impl Universe {
    pub fn insert(&mut self, variable: Variable) {
        self.0 |= 1u128 << variable.index();
    }

    pub fn contains(&self, variable: Variable) -> bool {
        self.0 & (1u128 << variable.index()) != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Variable> {
        let bits = self.0;
        (0..MAX_VARIABLES)
            .filter(move |i| bits & (1u128 << i) != 0)
            .map(|i| Variable(i as u8))
    }
}

#[derive(Debug)]
pub enum ParseError {
    Io(std::io::Error),
    Format(String),
    OutOfRange(VariableOutOfRange),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ParseError::Io(e) => write!(f, "i/o error: {}", e),
            ParseError::Format(msg) => write!(f, "malformed formula: {}", msg),
            ParseError::OutOfRange(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Io(e) => Some(e),
            ParseError::OutOfRange(e) => Some(e),
            ParseError::Format(_) => None,
        }
    }
}

impl From<std::io::Error> for ParseError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<VariableOutOfRange> for ParseError {
    fn from(e: VariableOutOfRange) -> Self {
        Self::OutOfRange(e)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Format {
    Text,
    Dimacs,
}

impl Format {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("cnf") | Some("dimacs") => Format::Dimacs,
            _ => Format::Text,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "text" => Some(Format::Text),
            "dimacs" => Some(Format::Dimacs),
            _ => None,
        }
    }
}

pub fn read_formula(path: impl AsRef<Path>, format: Format) -> Result<Formula, ParseError> {
    let file = File::open(path)?;
    match format {
        Format::Text => text::parse_reader(file),
        Format::Dimacs => dimacs::parse(file),
    }
}
