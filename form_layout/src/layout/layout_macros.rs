// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Build a [`crate::LayoutNode`] of kind `Layout`. Each argument is anything that
/// converts into a [`crate::NodeRef`], so field names and nodes can be mixed.
///
/// ```
/// use r3bl_form_layout::{LayoutNode, layout};
///
/// let tree = layout!("email", LayoutNode::row(["password1", "password2"]));
/// assert_eq!(tree.len(), 2);
/// ```
#[macro_export]
macro_rules! layout {
    ($($child:expr),* $(,)?) => {
        {
            let children: ::std::vec::Vec<$crate::NodeRef> =
                ::std::vec![$($crate::NodeRef::from($child)),*];
            $crate::LayoutNode::layout(children)
        }
    };
}

/// Build a `Div` node from mixed children. See [`layout!`].
#[macro_export]
macro_rules! div {
    ($($child:expr),* $(,)?) => {
        {
            let children: ::std::vec::Vec<$crate::NodeRef> =
                ::std::vec![$($crate::NodeRef::from($child)),*];
            $crate::LayoutNode::div(children)
        }
    };
}

/// Build a `Row` node from mixed children. See [`layout!`].
#[macro_export]
macro_rules! row {
    ($($child:expr),* $(,)?) => {
        {
            let children: ::std::vec::Vec<$crate::NodeRef> =
                ::std::vec![$($crate::NodeRef::from($child)),*];
            $crate::LayoutNode::row(children)
        }
    };
}
