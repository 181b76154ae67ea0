//! Demonstration routines walking through the frame operations.
//!
//! Each routine receives the frames it works on and returns what it
//! produces; nothing is shared through hidden state.

use anyhow::{Context, Result};

use crate::codec::CodecRegistry;
use crate::model::{ArithOp, CellValue, Column, DataFrame};
use crate::ops::{describe, BoundPolicy};
use crate::render::{render_column, render_frame, render_value_counts};

/// The passenger table used throughout the routines
pub fn passengers() -> DataFrame {
    DataFrame::new(vec![
        (
            "Name",
            vec![
                "Braund, Mr. Owen Harris".into(),
                "Allen, Mr. William Henry".into(),
                "Bonnell, Miss. Elizabeth".into(),
                "Adeoye Chloe Harper Shiori".into(),
                "Adeoye Ethan Horatio".into(),
                "Adeoye Saori".into(),
                "Adeoye Leon".into(),
            ],
        ),
        (
            "Class",
            vec![
                1i64.into(),
                1i64.into(),
                2i64.into(),
                2i64.into(),
                2i64.into(),
                2i64.into(),
                3i64.into(),
            ],
        ),
        (
            "Age",
            vec![
                22i64.into(),
                35i64.into(),
                58i64.into(),
                5i64.into(),
                12i64.into(),
                47i64.into(),
                49i64.into(),
            ],
        ),
        (
            "Sex",
            vec![
                "male".into(),
                "male".into(),
                "female".into(),
                "female".into(),
                "male".into(),
                "female".into(),
                "male".into(),
            ],
        ),
    ])
    .expect("literal columns are well-formed")
}

/// Basic access: file round-trip, single columns, literal columns,
/// scalar summaries
pub fn basic(frame: &DataFrame) -> Result<()> {
    let registry = CodecRegistry::new();
    let path = std::env::temp_dir().join(format!("framelite-passengers-{}.json", std::process::id()));
    registry
        .write(frame, &path)
        .context("writing passenger table")?;
    let reread = registry.read(&path).context("re-reading passenger table")?;
    println!("After writing and reading a JSON file:");
    println!("{}", render_frame(&reread));

    println!("{}", render_column(frame.column("Age")?));

    let family_ages = Column::from_values("Age", vec![12i64, 5, 49, 47]);
    println!("{}", render_column(&family_ages));
    println!(
        "The maximum age in the family is: {}",
        family_ages.max().unwrap_or(&CellValue::Null)
    );
    if let Some(summary) = describe(&family_ages)? {
        println!("describe the family ages:\n{}", summary);
    }
    println!("Shape of the family ages column: ({},)", family_ages.len());
    println!("Head of the family ages column:\n{}", render_column(&family_ages.head(5)));

    let pair = frame.select(&["Age", "Sex"])?;
    println!("Shape of the Age/Sex selection: {:?}", pair.shape());
    Ok(())
}

/// Filtering: masks, membership tests, mask composition, loc and iloc
pub fn filtering(frame: &DataFrame) -> Result<()> {
    let age = frame.column("Age")?;

    let adults = frame.filter(&age.ge(35i64)?)?;
    println!("Passengers aged 35 or over:\n{}", render_frame(&adults));

    println!(
        "Mask of ages under 35: {:?}",
        age.lt(35i64)?.iter().collect::<Vec<_>>()
    );

    let class = frame.column("Class")?;
    let edge_classes = frame.filter(&class.isin(&[1i64.into(), 3i64.into()]))?;
    println!("Passengers in class 1 or 3:\n{}", render_frame(&edge_classes));

    // membership is the element-wise OR of the two equality masks
    let either = class.eq_value(1i64)?.or(&class.eq_value(3i64)?)?;
    println!(
        "Same selection via OR-composition:\n{}",
        render_frame(&frame.filter(&either)?)
    );

    let names = frame.loc_mask(&age.gt(35i64)?, &["Name"])?;
    println!("Names of passengers over 35:\n{}", render_frame(&names));

    let window = frame.iloc(1..4, 1..3)?;
    println!("Rows 1..4, columns 1..3:\n{}", render_frame(&window));

    let first_two = frame.loc(&[CellValue::Int(0), CellValue::Int(1)], &[])?;
    println!("Rows labeled 0 and 1:\n{}", render_frame(&first_two));
    Ok(())
}

/// Derived columns: arithmetic assignment and renaming
pub fn derived(frame: &DataFrame) -> Result<DataFrame> {
    let cost = frame.column("Class")?.arith_scalar(ArithOp::Mul, 1000i64)?;
    let frame = frame.with_column("Class_Cost", cost.values().to_vec())?;

    let unit = frame
        .column("Class_Cost")?
        .arith(ArithOp::Div, frame.column("Class")?)?;
    let frame = frame.with_column("unit", unit.values().to_vec())?;

    let renamed = frame.rename(&[("Class", "Class_Level"), ("Class_Cost", "Cost")])?;
    println!("Renamed columns:\n{}", render_frame(&renamed.head(6)));
    println!("Original names intact:\n{}", render_frame(&frame.head(2)));
    Ok(frame)
}

/// Aggregation: column means, grouping, value counts
pub fn summary(frame: &DataFrame) -> Result<()> {
    for name in ["Age", "Class_Cost"] {
        let mean = frame.column(name)?.mean()?;
        println!("Mean of {}: {:?}", name, mean);
    }

    let by_sex = frame.select(&["Sex", "Age"])?.groupby(&["Sex"])?.mean()?;
    println!("Average age grouped by sex:\n{}", render_frame(&by_sex));

    let all_means = frame.groupby(&["Sex"])?.mean()?;
    println!(
        "Average of all numeric columns grouped by sex:\n{}",
        render_frame(&all_means)
    );

    let cost_by_sex = frame.groupby(&["Sex"])?.column_mean("Class_Cost")?;
    println!("Average class cost by sex:\n{}", render_frame(&cost_by_sex));

    let class = frame.column("Class")?;
    println!(
        "Class value counts:\n{}",
        render_value_counts("Class", &class.value_counts())
    );

    // the long way around: group by the column and count it
    let grouped_counts = frame.groupby(&["Class"])?.column_count("Class")?;
    println!(
        "Same counts via groupby:\n{}",
        render_frame(&grouped_counts)
    );
    Ok(())
}

/// Cleaning: missing values, bounding, duplicates, temporal coercion
pub fn cleaning() -> Result<()> {
    let frame = DataFrame::new(vec![
        (
            "Age",
            vec![
                100i64.into(),
                CellValue::Null,
                CellValue::Null,
                CellValue::Null,
                5i64.into(),
                6i64.into(),
                6i64.into(),
                6i64.into(),
                2i64.into(),
                77i64.into(),
            ],
        ),
        (
            "Fare",
            vec![
                7i64.into(),
                512i64.into(),
                8i64.into(),
                8i64.into(),
                13i64.into(),
                27i64.into(),
                27i64.into(),
                27i64.into(),
                7i64.into(),
                260i64.into(),
            ],
        ),
        (
            "Boarded",
            vec![
                "1912-04-10".into(),
                "1912-04-10".into(),
                "unknown".into(),
                "1912-04-11".into(),
                "1912-04-10".into(),
                "1912-04-11".into(),
                "1912-04-11".into(),
                "1912-04-11".into(),
                "1912-04-10".into(),
                "1912-04-10".into(),
            ],
        ),
    ])?;

    let complete = frame.dropna(Some(&["Age"]))?;
    println!(
        "Rows with a known age: {} of {}",
        complete.row_count(),
        frame.row_count()
    );

    let filled = frame.fillna_mean("Age")?;
    println!("Ages with the mean filled in:\n{}", render_column(filled.column("Age")?));

    // one bounding policy per bound: clamp the fares OR drop the outlier
    // rows, never both in sequence (the second pass would find nothing)
    let capped = filled.bound_above("Fare", 100.0, BoundPolicy::Clamp)?;
    println!("Fares clamped at 100:\n{}", render_column(capped.column("Fare")?));
    let trimmed = filled.bound_above("Fare", 100.0, BoundPolicy::DropRows)?;
    println!("Dropping fares over 100 instead keeps {} rows", trimmed.row_count());

    let deduped = capped.drop_duplicates();
    println!(
        "After dropping duplicate rows: {} of {}",
        deduped.row_count(),
        capped.row_count()
    );

    let dated = deduped.to_datetime("Boarded")?;
    let parsed = dated.dropna(Some(&["Boarded"]))?;
    println!(
        "Rows with a parsable boarding date:\n{}",
        render_frame(&parsed)
    );
    Ok(())
}

/// Construction from records and label-based indexing
pub fn construction() -> Result<()> {
    let records = vec![
        vec![
            ("Name".to_string(), CellValue::from("Adeoye Saori")),
            ("Age".to_string(), CellValue::Int(47)),
        ],
        vec![
            ("Name".to_string(), CellValue::from("Adeoye Leon")),
            ("Age".to_string(), CellValue::Int(49)),
            ("Cabin".to_string(), CellValue::from("C85")),
        ],
    ];
    let frame = DataFrame::from_records(&records)?;
    println!("Built from records:\n{}", render_frame(&frame));

    let indexed = frame.set_index("Name")?;
    let row = indexed.loc(&["Adeoye Leon".into()], &[])?;
    println!("Row labeled \"Adeoye Leon\":\n{}", render_frame(&row));

    let restored = indexed.reset_index()?;
    println!("Index demoted back to a column:\n{}", render_frame(&restored));
    Ok(())
}

/// Run every routine in sequence, threading frames explicitly
pub fn run_all() -> Result<()> {
    let frame = passengers();
    basic(&frame)?;
    filtering(&frame)?;
    let enriched = derived(&frame)?;
    summary(&enriched)?;
    cleaning()?;
    construction()?;
    Ok(())
}
