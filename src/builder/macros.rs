//! Macros for ergonomic state definitions.

/// Generate the [`State`](crate::State) implementation for a struct.
///
/// The first argument is the state type, the second the field holding its
/// [`Transitions`](crate::Transitions). The optional `hooks` list names the
/// runtime hooks the type implements: any of `Exit`, `PreUpdate`, `Update`.
/// Each listed hook trait must also be implemented by hand. Enter hooks need
/// no listing; the typed `change_state` calls find them statically.
///
/// # Example
///
/// ```
/// use tickstate::{impl_state, Enter, Exit, State, Transitions, Update};
///
/// struct Menu {
///     transitions: Transitions,
///     frames: u32,
/// }
///
/// impl_state!(Menu, transitions, hooks: [Update, Exit]);
///
/// impl Enter for Menu {
///     fn on_enter(&mut self) {
///         self.frames = 0;
///     }
/// }
///
/// impl Update for Menu {
///     fn on_update(&mut self) {
///         self.frames += 1;
///     }
/// }
///
/// impl Exit for Menu {
///     fn on_exit(&mut self) {}
/// }
///
/// let mut menu = Menu { transitions: Transitions::new(), frames: 0 };
/// assert!(menu.as_update().is_some());
/// assert!(menu.as_exit().is_some());
/// assert!(menu.as_pre_update().is_none());
/// ```
#[macro_export]
macro_rules! impl_state {
    (@hook Exit) => {
        fn as_exit(&mut self) -> ::core::option::Option<&mut dyn $crate::Exit> {
            ::core::option::Option::Some(self)
        }
    };
    (@hook PreUpdate) => {
        fn as_pre_update(&mut self) -> ::core::option::Option<&mut dyn $crate::PreUpdate> {
            ::core::option::Option::Some(self)
        }
    };
    (@hook Update) => {
        fn as_update(&mut self) -> ::core::option::Option<&mut dyn $crate::Update> {
            ::core::option::Option::Some(self)
        }
    };
    (
        $ty:ty, $field:ident
        $(, hooks: [$($hook:ident),* $(,)?])?
        $(,)?
    ) => {
        impl $crate::State for $ty {
            fn transitions(&self) -> &$crate::Transitions {
                &self.$field
            }

            fn transitions_mut(&mut self) -> &mut $crate::Transitions {
                &mut self.$field
            }

            $($($crate::impl_state!(@hook $hook);)*)?
        }
    };
}
