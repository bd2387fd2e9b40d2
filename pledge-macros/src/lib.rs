use proc_macro::{Delimiter, Group, TokenStream, TokenTree};

/// Finds the body of the annotated function: the last brace-delimited group.
fn body_position(tokens: &[TokenTree]) -> Option<usize> {
    tokens
        .iter()
        .rposition(|t| matches!(t, TokenTree::Group(g) if g.delimiter() == Delimiter::Brace))
}

/// Replaces the function body at `pos` with `new_block`.
fn replace_body(tokens: &mut [TokenTree], pos: usize, new_block: String) -> Result<(), String> {
    let stream = new_block
        .parse::<TokenStream>()
        .map_err(|err| err.to_string())?;

    tokens[pos] = TokenTree::Group(Group::new(Delimiter::Brace, stream));
    Ok(())
}

fn compile_error(macro_name: &str, msg: &str) -> TokenStream {
    format!("compile_error!({:?});", format!("{macro_name}: {msg}"))
        .parse()
        .unwrap_or_default()
}

/// Runs `fn main` inside a Pledge runtime.
///
/// The body executes inside `Runtime::block_on`, so promises can be created
/// directly and every queued microtask is drained before `main` returns.
///
/// ```rust,ignore
/// #[pledge::main]
/// fn main() {
///     Promise::<i32, String>::resolve(1).then(|n| {
///         println!("{n}");
///         Ok(())
///     });
/// }
/// ```
#[proc_macro_attribute]
pub fn main(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut tokens: Vec<TokenTree> = item.into_iter().collect();

    let Some(pos) = body_position(&tokens) else {
        return compile_error("#[pledge::main]", "expected a function body");
    };

    let block = match &tokens[pos] {
        TokenTree::Group(g) => g.stream().to_string(),
        _ => unreachable!(),
    };

    let new_block = format!(
        "{{
            let runtime = ::pledge::Runtime::new();
            runtime.block_on(move || {{ {} }})
        }}",
        block
    );

    if let Err(msg) = replace_body(&mut tokens, pos, new_block) {
        return compile_error("#[pledge::main]", &msg);
    }

    tokens.into_iter().collect()
}

/// Marks a test that runs inside its own Pledge runtime.
///
/// Adds `#[test]` and wraps the body in `Runtime::block_on`. Unhandled
/// rejections panic the test, as with the default runtime configuration.
///
/// ```rust,ignore
/// #[pledge::test]
/// fn resolves() {
///     let promise = Promise::<i32, String>::resolve(1);
///     pledge::task::run_until_idle();
///     assert_eq!(promise.peek(), Some(Ok(1)));
/// }
/// ```
#[proc_macro_attribute]
pub fn test(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut tokens: Vec<TokenTree> = item.into_iter().collect();

    let Some(pos) = body_position(&tokens) else {
        return compile_error("#[pledge::test]", "expected a function body");
    };

    let block = match &tokens[pos] {
        TokenTree::Group(g) => g.stream().to_string(),
        _ => unreachable!(),
    };

    let new_block = format!(
        "{{
        let runtime = ::pledge::Runtime::new();
        runtime.block_on(move || {{ {} }});
    }}",
        block
    );

    if let Err(msg) = replace_body(&mut tokens, pos, new_block) {
        return compile_error("#[pledge::test]", &msg);
    }

    let test_attr: TokenStream = "#[test]".parse().unwrap_or_default();
    let mut result: Vec<TokenTree> = test_attr.into_iter().collect();
    result.extend(tokens);

    result.into_iter().collect()
}
