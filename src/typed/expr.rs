//! Typed expression trees
//!
//! A [`TypedExpr<T>`] is a tree whose static index `T` names the type it
//! evaluates to. Subtrees whose type is fixed by the node (the operands of
//! `+` and `>`, the predicate of a conditional) are stored at their static
//! index, so a numeric addition over a boolean cannot be written down.
//!
//! Subtrees whose index is only known at runtime (a bound value, a function
//! body, both sides of an application) are stored as [`SomeTypedExpr`]: a
//! node paired with its descriptor. The checked constructors on
//! `SomeTypedExpr` compare descriptors before building a node, and
//! [`SomeTypedExpr::cast`] recovers a static index by consulting the witness.

use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use crate::ast::Expression;
use crate::types::{Type, TypeError};

use super::witness::{Bool, Equal, Fun, Num, Ty};

#[derive(Debug)]
pub(crate) enum Node {
    Number(i64),
    Boolean(bool),
    Add(TypedExpr<Num>, TypedExpr<Num>),
    GreaterThan(TypedExpr<Num>, TypedExpr<Num>),
    /// Both branches have the type of the whole node
    Conditional {
        predicate: TypedExpr<Bool>,
        on_true: Rc<Node>,
        on_false: Rc<Node>,
    },
    /// The body has the type of the whole node
    Binding {
        name: String,
        value: SomeTypedExpr,
        body: Rc<Node>,
    },
    /// `value` has type `annotation`, the body that of the whole node
    RecursiveBinding {
        name: String,
        annotation: Type,
        value: Rc<Node>,
        body: Rc<Node>,
    },
    Reference(String),
    Function {
        parameter: String,
        parameter_ty: Type,
        body: SomeTypedExpr,
    },
    Apply {
        function: SomeTypedExpr,
        argument: SomeTypedExpr,
    },
}

/// An expression statically known to evaluate to a `T`.
pub struct TypedExpr<T> {
    node: Rc<Node>,
    marker: PhantomData<fn() -> T>,
}

impl<T> Clone for TypedExpr<T> {
    fn clone(&self) -> Self {
        TypedExpr {
            node: self.node.clone(),
            marker: PhantomData,
        }
    }
}

impl<T: Ty> fmt::Debug for TypedExpr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedExpr")
            .field("ty", &T::descriptor())
            .field("node", &self.node)
            .finish()
    }
}

impl<T: Ty> TypedExpr<T> {
    fn from_node(node: Node) -> Self {
        Self::from_rc(Rc::new(node))
    }

    fn from_rc(node: Rc<Node>) -> Self {
        TypedExpr {
            node,
            marker: PhantomData,
        }
    }

    pub(crate) fn node(&self) -> &Node {
        &self.node
    }

    pub fn ty(&self) -> Type {
        T::descriptor()
    }

    /// Forget the static index, keeping it as a runtime descriptor.
    pub fn erase(self) -> SomeTypedExpr {
        SomeTypedExpr {
            node: self.node,
            ty: T::descriptor(),
        }
    }

    pub fn conditional(
        predicate: TypedExpr<Bool>,
        on_true: TypedExpr<T>,
        on_false: TypedExpr<T>,
    ) -> Self {
        Self::from_node(Node::Conditional {
            predicate,
            on_true: on_true.node,
            on_false: on_false.node,
        })
    }

    pub fn binding<A: Ty>(name: impl Into<String>, value: TypedExpr<A>, body: TypedExpr<T>) -> Self {
        Self::from_node(Node::Binding {
            name: name.into(),
            value: value.erase(),
            body: body.node,
        })
    }

    pub fn recursive_binding<A: Ty, B: Ty>(
        name: impl Into<String>,
        value: TypedExpr<Fun<A, B>>,
        body: TypedExpr<T>,
    ) -> Self {
        Self::from_node(Node::RecursiveBinding {
            name: name.into(),
            annotation: <Fun<A, B>>::descriptor(),
            value: value.node,
            body: body.node,
        })
    }

    /// A reference claimed to have type `T`.
    ///
    /// Nothing here ties the claim to the binding the name will resolve to;
    /// the typed interpreter compares the claim with the binding's witness
    /// and fails with a witness mismatch if they differ.
    pub fn reference(name: impl Into<String>) -> Self {
        Self::from_node(Node::Reference(name.into()))
    }

    pub fn apply<A: Ty>(function: TypedExpr<Fun<A, T>>, argument: TypedExpr<A>) -> Self {
        Self::from_node(Node::Apply {
            function: function.erase(),
            argument: argument.erase(),
        })
    }

    /// The untyped expression this tree was built from.
    pub fn to_expression(&self) -> Expression {
        to_expression(&self.node)
    }
}

impl TypedExpr<Num> {
    pub fn number(n: i64) -> Self {
        Self::from_node(Node::Number(n))
    }

    pub fn add(left: TypedExpr<Num>, right: TypedExpr<Num>) -> Self {
        Self::from_node(Node::Add(left, right))
    }
}

impl TypedExpr<Bool> {
    pub fn boolean(b: bool) -> Self {
        Self::from_node(Node::Boolean(b))
    }

    pub fn greater_than(left: TypedExpr<Num>, right: TypedExpr<Num>) -> Self {
        Self::from_node(Node::GreaterThan(left, right))
    }
}

impl<A: Ty, B: Ty> TypedExpr<Fun<A, B>> {
    pub fn function(parameter: impl Into<String>, body: TypedExpr<B>) -> Self {
        Self::from_node(Node::Function {
            parameter: parameter.into(),
            parameter_ty: A::descriptor(),
            body: body.erase(),
        })
    }
}

/// A typed expression whose index is only known at runtime.
#[derive(Debug, Clone)]
pub struct SomeTypedExpr {
    node: Rc<Node>,
    ty: Type,
}

impl SomeTypedExpr {
    pub(crate) fn node(&self) -> &Node {
        &self.node
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// Recover the static index `T` through the witness for `T`.
    pub fn cast<T: Ty>(self) -> Result<TypedExpr<T>, TypeError> {
        match T::witness().cast(&self.ty) {
            Some(proof) => Ok(proof.retag(self.node)),
            None => Err(TypeError::type_mismatch(T::descriptor(), self.ty)),
        }
    }

    /// Both branches must have the same descriptor.
    pub fn conditional(
        predicate: TypedExpr<Bool>,
        on_true: SomeTypedExpr,
        on_false: SomeTypedExpr,
    ) -> Result<Self, TypeError> {
        if on_true.ty != on_false.ty {
            return Err(TypeError::type_mismatch(on_true.ty, on_false.ty));
        }
        Ok(SomeTypedExpr {
            node: Rc::new(Node::Conditional {
                predicate,
                on_true: on_true.node,
                on_false: on_false.node,
            }),
            ty: on_true.ty,
        })
    }

    pub fn binding(name: impl Into<String>, value: SomeTypedExpr, body: SomeTypedExpr) -> Self {
        SomeTypedExpr {
            node: Rc::new(Node::Binding {
                name: name.into(),
                value,
                body: body.node,
            }),
            ty: body.ty,
        }
    }

    /// `annotation` must be a function type and match the value's descriptor.
    pub fn recursive_binding(
        name: impl Into<String>,
        annotation: Type,
        value: SomeTypedExpr,
        body: SomeTypedExpr,
    ) -> Result<Self, TypeError> {
        if !annotation.is_function() {
            return Err(TypeError::not_a_function(annotation));
        }
        if value.ty != annotation {
            return Err(TypeError::type_mismatch(annotation, value.ty));
        }
        Ok(SomeTypedExpr {
            node: Rc::new(Node::RecursiveBinding {
                name: name.into(),
                annotation,
                value: value.node,
                body: body.node,
            }),
            ty: body.ty,
        })
    }

    /// A reference claimed to have type `ty`; see [`TypedExpr::reference`].
    pub fn reference(name: impl Into<String>, ty: Type) -> Self {
        SomeTypedExpr {
            node: Rc::new(Node::Reference(name.into())),
            ty,
        }
    }

    pub fn function(parameter: impl Into<String>, parameter_ty: Type, body: SomeTypedExpr) -> Self {
        let ty = Type::function(parameter_ty.clone(), body.ty.clone());
        SomeTypedExpr {
            node: Rc::new(Node::Function {
                parameter: parameter.into(),
                parameter_ty,
                body,
            }),
            ty,
        }
    }

    /// `function` must have a function type whose parameter matches the
    /// argument's descriptor.
    pub fn apply(function: SomeTypedExpr, argument: SomeTypedExpr) -> Result<Self, TypeError> {
        let (parameter_ty, result_ty) = function
            .ty
            .as_function()
            .ok_or_else(|| TypeError::not_a_function(function.ty.clone()))?;
        if parameter_ty != &argument.ty {
            return Err(TypeError::type_mismatch(
                parameter_ty.clone(),
                argument.ty.clone(),
            ));
        }
        let ty = result_ty.clone();
        Ok(SomeTypedExpr {
            node: Rc::new(Node::Apply { function, argument }),
            ty,
        })
    }

    /// The untyped expression this tree was built from, annotations included.
    pub fn to_expression(&self) -> Expression {
        to_expression(&self.node)
    }
}

impl<T: Ty> Equal<T> {
    fn retag(self, node: Rc<Node>) -> TypedExpr<T> {
        TypedExpr::from_rc(node)
    }
}

impl<T: Ty> From<TypedExpr<T>> for SomeTypedExpr {
    fn from(expr: TypedExpr<T>) -> Self {
        expr.erase()
    }
}

fn to_expression(node: &Node) -> Expression {
    match node {
        Node::Number(n) => Expression::number(*n),
        Node::Boolean(b) => Expression::boolean(*b),
        Node::Add(left, right) => Expression::add(left.to_expression(), right.to_expression()),
        Node::GreaterThan(left, right) => {
            Expression::greater_than(left.to_expression(), right.to_expression())
        }
        Node::Conditional {
            predicate,
            on_true,
            on_false,
        } => Expression::conditional(
            predicate.to_expression(),
            to_expression(on_true),
            to_expression(on_false),
        ),
        Node::Binding { name, value, body } => Expression::binding(
            name.clone(),
            value.to_expression(),
            to_expression(body),
        ),
        Node::RecursiveBinding {
            name,
            annotation,
            value,
            body,
        } => Expression::recursive_binding(
            name.clone(),
            annotation.clone(),
            to_expression(value),
            to_expression(body),
        ),
        Node::Reference(name) => Expression::reference(name.clone()),
        Node::Function {
            parameter,
            parameter_ty,
            body,
        } => Expression::function(parameter.clone(), parameter_ty.clone(), body.to_expression()),
        Node::Apply { function, argument } => {
            Expression::apply(function.to_expression(), argument.to_expression())
        }
    }
}
