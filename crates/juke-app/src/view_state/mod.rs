//! View-state objects backing the client screens.
//! 视图状态：把用例结果转换为界面可显示的文本。

mod auth_form;

pub use auth_form::{AuthForm, AuthFormState, AuthMode};
