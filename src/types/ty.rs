use std::fmt;

/// Type descriptor for expressions.
///
/// Descriptors are plain data and compare structurally: two function types
/// are equal exactly when their parameter and result types are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Num,
    Bool,
    Function(Box<Type>, Box<Type>),
}

impl Type {
    pub fn function(from: Type, to: Type) -> Self {
        Type::Function(Box::new(from), Box::new(to))
    }

    /// Split a function type into its parameter and result types.
    pub fn as_function(&self) -> Option<(&Type, &Type)> {
        match self {
            Type::Function(from, to) => Some((from, to)),
            Type::Num | Type::Bool => None,
        }
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Type::Function(_, _))
    }

    pub fn pretty(&self) -> String {
        match self {
            Type::Num => "Num".to_string(),
            Type::Bool => "Bool".to_string(),
            Type::Function(from, to) => {
                let from_str = if from.is_function() {
                    format!("({})", from.pretty())
                } else {
                    from.pretty()
                };
                format!("{} -> {}", from_str, to.pretty())
            }
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.pretty())
    }
}
