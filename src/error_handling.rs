/// `Debug` helper for error enums: the error itself, then every `source()` below it.
///
/// Delivery failures reach the logs through `?e`, and the interesting part (a refused key, a
/// timeout) is usually two causes down.
pub fn error_chain_fmt(
    error: &impl std::error::Error,
    formatter: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(formatter, "{}\n", error)?;
    let mut current = error.source();
    while let Some(cause) = current {
        writeln!(formatter, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}
