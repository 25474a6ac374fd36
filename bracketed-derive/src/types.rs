//! Type utilities for the derive macro.
//!
//! Maps `syn` field types onto the shapes the classifier understands.

use bracketed_core::{DeclaredType, Nullability, TypeShape};
use quote::ToTokens;

const TEXT_TYPES: &[&str] = &["String", "str"];
const TEXT_POINTERS: &[&str] = &["Cow", "Box", "Rc", "Arc"];
const MAP_TYPES: &[&str] = &["HashMap", "BTreeMap", "IndexMap"];
const SEQUENCE_TYPES: &[&str] = &[
    "Vec",
    "VecDeque",
    "HashSet",
    "BTreeSet",
    "IndexSet",
    "LinkedList",
    "BinaryHeap",
];
// Smart pointers rendered through their pointee.
const TRANSPARENT_POINTERS: &[&str] = &["Box", "Rc", "Arc"];

/// Checks if a type is `PhantomData<...>` or `std::marker::PhantomData<...>`.
///
/// `PhantomData<T>` never carries data, so its parameters need no bounds.
pub(crate) fn is_phantom_data(ty: &syn::Type) -> bool {
    if let syn::Type::Path(path) = ty {
        if let Some(last_segment) = path.path.segments.last() {
            return last_segment.ident == "PhantomData"
                && matches!(
                    last_segment.arguments,
                    syn::PathArguments::AngleBracketed(_)
                );
        }
    }
    false
}

/// Describes a field type, or returns `None` if it cannot be classified.
pub(crate) fn declared_type(ty: &syn::Type) -> Option<DeclaredType> {
    let name = ty.to_token_stream().to_string();
    let (shape, nullability) = shape_of(ty)?;
    Some(DeclaredType::new(name, shape).with_nullability(nullability))
}

fn shape_of(ty: &syn::Type) -> Option<(TypeShape, Nullability)> {
    match ty {
        syn::Type::Path(path) if path.qself.is_none() => {
            let segment = path.path.segments.last()?;
            let ident = segment.ident.to_string();
            let argument = single_type_argument(&segment.arguments);

            if ident == "Option" {
                let (shape, _) = shape_of(argument?)?;
                return Some((shape, Nullability::Optional));
            }
            if TEXT_TYPES.contains(&ident.as_str()) {
                return Some((TypeShape::Text, Nullability::NotNullable));
            }
            if TEXT_POINTERS.contains(&ident.as_str()) && argument.is_some_and(is_str) {
                return Some((TypeShape::Text, Nullability::NotNullable));
            }
            if TRANSPARENT_POINTERS.contains(&ident.as_str()) {
                if let Some(inner) = argument {
                    return shape_of(inner);
                }
            }
            if MAP_TYPES.contains(&ident.as_str()) {
                return Some((TypeShape::KeyValue, Nullability::NotNullable));
            }
            if SEQUENCE_TYPES.contains(&ident.as_str()) {
                return Some((TypeShape::Sequence, Nullability::NotNullable));
            }
            Some((TypeShape::Opaque, Nullability::NotNullable))
        }
        syn::Type::Reference(reference) => shape_of(&reference.elem),
        syn::Type::Paren(paren) => shape_of(&paren.elem),
        syn::Type::Group(group) => shape_of(&group.elem),
        syn::Type::Array(_) | syn::Type::Slice(_) => {
            Some((TypeShape::Sequence, Nullability::NotNullable))
        }
        syn::Type::Path(_)
        | syn::Type::Tuple(_)
        | syn::Type::Ptr(_)
        | syn::Type::BareFn(_)
        | syn::Type::TraitObject(_) => Some((TypeShape::Opaque, Nullability::NotNullable)),
        _ => None,
    }
}

fn single_type_argument(arguments: &syn::PathArguments) -> Option<&syn::Type> {
    let syn::PathArguments::AngleBracketed(args) = arguments else {
        return None;
    };
    let mut types = args.args.iter().filter_map(|arg| match arg {
        syn::GenericArgument::Type(ty) => Some(ty),
        _ => None,
    });
    let first = types.next()?;
    types.next().is_none().then_some(first)
}

fn is_str(ty: &syn::Type) -> bool {
    matches!(ty, syn::Type::Path(path) if path.path.is_ident("str"))
}
