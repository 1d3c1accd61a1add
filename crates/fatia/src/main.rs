use clap::Parser;
use fatia::Color;
use fatia::layout::{SliceInput, SliceSet};

#[derive(Parser, Debug)]
#[command(name = "fatia", version, about = "Compute pie-chart slice layouts", long_about = None)]
struct Cli {
    /// Slices as VALUE:LABEL or VALUE:LABEL:#rrggbb, e.g. `25:rent 12.5:food`
    #[arg(required = true)]
    slices: Vec<String>,

    /// Ask which slice contains the given angle (degrees, any range)
    #[arg(long, value_name = "DEGREES")]
    hit: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let inputs = cli
        .slices
        .iter()
        .map(|s| parse_slice(s))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let result = SliceSet::build_from(inputs);
    if let Some(err) = &result.rejected {
        log::warn!("stopped after {} slice(s): {}", result.consumed, err);
    }

    println!("{:>3}  {:<16} {:>7}  {:>8}  {:>8}  color", "#", "label", "value", "start", "end");
    for slice in result.set.slices() {
        println!(
            "{:>3}  {:<16} {:>6}%  {:>7.2}°  {:>7.2}°  {}",
            slice.index, slice.label, slice.value, slice.start_angle, slice.end_angle, slice.color
        );
    }
    println!("total: {}%", result.set.total());

    if let Some(angle) = cli.hit {
        match result.set.hit_test(angle) {
            Some(i) => {
                let slice = result.set.get(i).expect("hit index is valid");
                println!("{angle}° hits slice {i} ({})", slice.caption());
            }
            None => println!("{angle}° hits nothing"),
        }
    }

    Ok(())
}

fn parse_slice(spec: &str) -> anyhow::Result<SliceInput> {
    let (value, rest) = spec
        .split_once(':')
        .ok_or_else(|| anyhow::anyhow!("expected VALUE:LABEL, got '{spec}'"))?;
    let value: f64 = value
        .parse()
        .map_err(|_| anyhow::anyhow!("'{value}' is not a number in '{spec}'"))?;

    let input = match rest.split_once(':') {
        Some((label, color)) => {
            let color: Color = color
                .parse()
                .map_err(|e| anyhow::anyhow!("bad color in '{spec}': {e}"))?;
            SliceInput::new(value, label).with_color(color)
        }
        None => SliceInput::new(value, rest),
    };
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_slice_specs() {
        let plain = parse_slice("25:rent").unwrap();
        assert_eq!(plain.value, 25.0);
        assert_eq!(plain.label.as_ref(), "rent");
        assert!(plain.color.is_none());

        let colored = parse_slice("12.5:food:#fcba03").unwrap();
        assert_eq!(colored.color, Some("#fcba03".parse().unwrap()));

        assert!(parse_slice("rent").is_err());
        assert!(parse_slice("x:rent").is_err());
        assert!(parse_slice("25:rent:orange").is_err());
    }
}
