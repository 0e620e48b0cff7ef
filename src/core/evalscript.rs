//! Renders a mapper as a Sentinel Hub evalscript (version 3), the form in which
//! the processing platform receives the band contract.
use crate::core::mapper::PixelMapper;
use crate::error::{Error, Result};

const INDENT: &str = "  ";

/// Evalscript source for `mapper`: a `setup()` mirroring its declaration and an
/// `evaluatePixel()` that routes each input band to its output.
pub fn render_evalscript(mapper: &dyn PixelMapper) -> Result<String> {
    let setup = mapper.setup();
    let routes = mapper.routes();

    let inputs = setup
        .input
        .iter()
        .map(|b| format!("\"{}\"", b))
        .collect::<Vec<_>>()
        .join(", ");

    let mut outputs = Vec::with_capacity(setup.output.len());
    let mut returns = Vec::with_capacity(setup.output.len());
    for band in &setup.output {
        if band.bands != 1 {
            return Err(Error::UnsupportedSampleLayout {
                id: band.id.clone(),
                reason: format!("{} channels declared, pass-through routes carry 1", band.bands),
            });
        }
        let source = routes
            .iter()
            .find(|(id, _)| *id == band.id)
            .map(|(_, source)| *source)
            .ok_or_else(|| Error::UnknownBand(band.id.clone()))?;

        outputs.push(format!(
            "{{\n{i}{i}{i}id: \"{}\",\n{i}{i}{i}bands: {},\n{i}{i}{i}sampleType: \"{}\"\n{i}{i}}}",
            band.id,
            band.bands,
            band.sample_type,
            i = INDENT
        ));
        returns.push(format!("{i}{i}{}: [samples.{}]", band.id, source, i = INDENT));
    }

    let mut script = String::new();
    script.push_str("//VERSION=3\n");
    script.push_str("function setup() {\n");
    script.push_str(&format!("{i}return {{\n", i = INDENT));
    script.push_str(&format!("{i}{i}input: [{}],\n", inputs, i = INDENT));
    script.push_str(&format!(
        "{i}{i}output: [{}]\n",
        outputs.join(", "),
        i = INDENT
    ));
    script.push_str(&format!("{i}}};\n", i = INDENT));
    script.push_str("}\n\n");
    script.push_str("function evaluatePixel(samples) {\n");
    script.push_str(&format!("{i}return {{\n", i = INDENT));
    script.push_str(&returns.join(",\n"));
    script.push('\n');
    script.push_str(&format!("{i}}};\n", i = INDENT));
    script.push_str("}\n");
    Ok(script)
}
