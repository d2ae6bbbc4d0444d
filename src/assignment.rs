use crate::formula::{Formula, Literal, Variable, MAX_VARIABLES};
use std::fmt::{self, Display, Formatter};
use std::ops::{Deref, DerefMut, Not};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Truth {
    True,
    False,
    Undefined,
}

impl Truth {
    pub fn is_defined(self) -> bool {
        self != Truth::Undefined
    }
}

impl From<bool> for Truth {
    fn from(value: bool) -> Self {
        if value {
            Truth::True
        } else {
            Truth::False
        }
    }
}

impl Not for Truth {
    type Output = Truth;

    fn not(self) -> Truth {
        match self {
            Truth::True => Truth::False,
            Truth::False => Truth::True,
            Truth::Undefined => Truth::Undefined,
        }
    }
}

impl Display for Truth {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(match self {
            Truth::True => "True",
            Truth::False => "False",
            Truth::Undefined => "Undefined",
        })
    }
}

/// A (partial) interpretation: one truth value per variable in the bounded
/// namespace.
#[derive(Clone, PartialEq, Eq)]
pub struct Assignment {
    values: [Truth; MAX_VARIABLES],
}

impl Assignment {
    /// Every variable Undefined.
    pub fn new() -> Self {
        Self {
            values: [Truth::Undefined; MAX_VARIABLES],
        }
    }

    /// Variables of `formula` take `default`, all others stay Undefined.
    pub fn for_formula(formula: &Formula, default: Truth) -> Self {
        let mut assignment = Self::new();
        for variable in formula.universe().iter() {
            assignment.set(variable, default);
        }
        assignment
    }

    pub fn get(&self, variable: Variable) -> Truth {
        self.values[variable.index()]
    }

    pub fn set(&mut self, variable: Variable, value: Truth) {
        self.values[variable.index()] = value;
    }

    /// Value of `literal`: the variable's value, flipped for a negative literal.
    pub fn literal(&self, literal: &Literal) -> Truth {
        let value = self.get(literal.variable());
        if literal.is_positive() {
            value
        } else {
            !value
        }
    }

    /// Sets `variable` to `value` until the returned guard is dropped, at
    /// which point it goes back to Undefined unless the guard was committed.
    pub fn tentative(&mut self, variable: Variable, value: bool) -> Tentative<'_> {
        debug_assert_eq!(self.get(variable), Truth::Undefined);
        self.set(variable, value.into());
        Tentative {
            assignment: self,
            variable,
            committed: false,
        }
    }

    /// Defined variables and their values, in index order.
    pub fn iter(&self) -> impl Iterator<Item = (Variable, bool)> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(i, value)| match value {
                Truth::True => Some((i, true)),
                Truth::False => Some((i, false)),
                Truth::Undefined => None,
            })
            .filter_map(|(i, value)| Variable::new(i).ok().map(|v| (v, value)))
    }

    pub fn num_defined(&self) -> usize {
        self.values.iter().filter(|v| v.is_defined()).count()
    }
}

impl Default for Assignment {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Assignment {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(v, value)| (v.to_string(), value)))
            .finish()
    }
}

/// One `<variable> = <value>` line per defined variable.
impl Display for Assignment {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for (variable, value) in self.iter() {
            writeln!(f, "{} = {}", variable, Truth::from(value))?;
        }
        Ok(())
    }
}

/// Scoped assignment of a single variable, see [`Assignment::tentative`].
pub struct Tentative<'a> {
    assignment: &'a mut Assignment,
    variable: Variable,
    committed: bool,
}

impl Tentative<'_> {
    pub fn commit(mut self) {
        self.committed = true;
    }
}

impl Deref for Tentative<'_> {
    type Target = Assignment;

    fn deref(&self) -> &Assignment {
        self.assignment
    }
}

impl DerefMut for Tentative<'_> {
    fn deref_mut(&mut self) -> &mut Assignment {
        self.assignment
    }
}

impl Drop for Tentative<'_> {
    fn drop(&mut self) {
        if !self.committed {
            self.assignment.set(self.variable, Truth::Undefined);
        }
    }
}
