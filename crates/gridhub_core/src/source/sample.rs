//! Placeholder catalog shown at design time and first run.
//!
//! # Responsibility
//! - Build the fixed four-group "get your ex back" tips catalog.
//!
//! # Invariants
//! - Group and item identifiers are unique across the catalog.
//! - Items are added to their group in the listed order.

use crate::model::group::{Group, GroupConfig, GroupFields};
use crate::model::item::{DisplaySpan, Item, ItemFields};
use crate::model::validation::ValidationError;
use crate::source::data_source::DataSource;
use log::debug;

const GROUP_IMAGE: &str = "Assets/DarkGray.png";

const SMALL: (u32, u32) = (35, 35);
const BIG: (u32, u32) = (69, 70);
const LANDSCAPE: (u32, u32) = (69, 35);
const MEDIUM: (u32, u32) = (41, 41);

const ITEM_DESCRIPTION: &str =
    "Item Description: Practical, step-by-step advice for rebuilding a relationship.";
const GROUP_DESCRIPTION: &str =
    "Group Description: A curated set of tips collected for readers working through a breakup.";

struct SampleGroup {
    id: &'static str,
    title: &'static str,
    subtitle: &'static str,
    items: &'static [SampleItem],
}

struct SampleItem {
    id: &'static str,
    title: &'static str,
    image: &'static str,
    headline: &'static str,
    /// (column span, row span)
    span: (u32, u32),
}

const SAMPLE_GROUPS: &[SampleGroup] = &[
    SampleGroup {
        id: "Group-1",
        title: "Get Ex-Boy Friend Back",
        subtitle: "Group Subtitle: 1",
        items: &[
            SampleItem {
                id: "Small-Group-1-Item1",
                title: "Tip 01",
                image: "Assets/HubPage/HubpageImage2.png",
                headline: "The Right Steps for Love",
                span: SMALL,
            },
            SampleItem {
                id: "Small-Group-1-Item2",
                title: "Tip 02",
                image: "Assets/HubPage/HubpageImage3.png",
                headline: "Love Detox to Win Him Back Again",
                span: SMALL,
            },
            SampleItem {
                id: "Small-Group-1-Item3",
                title: "Tip 03",
                image: "Assets/HubPage/HubpageImage4.png",
                headline: "Getting Your Ex Back and Getting Rid of Grudges",
                span: SMALL,
            },
            SampleItem {
                id: "Big-Group-1-Item4",
                title: "Tip 04",
                image: "Assets/HubPage/HubpageImage5.png",
                headline: "How NOT Talking to Him Can Make Him Want You",
                span: BIG,
            },
            SampleItem {
                id: "Landscape-Group-1-Item5",
                title: "Tip 05",
                image: "Assets/HubPage/HubpageImage6.png",
                headline: "What to Do If You Have to See Him All the Time",
                span: LANDSCAPE,
            },
        ],
    },
    SampleGroup {
        id: "Group-2",
        title: "Get Ex-Girl Friend Back",
        subtitle: "Group Subtitle: 2",
        items: &[
            SampleItem {
                id: "Big-Group-2-Item1",
                title: "Tip 01",
                image: "Assets/HubPage/HubpageImage7.png",
                headline: "How to Get Back Your Ex Girlfriend",
                span: BIG,
            },
            SampleItem {
                id: "Landscape-Group-2-Item2",
                title: "Tip 02",
                image: "Assets/HubPage/HubpageImage8.png",
                headline: "What You Need to do to Get Ex-Wife Back",
                span: LANDSCAPE,
            },
            SampleItem {
                id: "Medium-Group-2-Item3",
                title: "Tip 03",
                image: "Assets/HubPage/HubpageImage9.png",
                headline: "Get Your Ex-Girlfriend Back -- Simple Advice You Need Now",
                span: MEDIUM,
            },
            SampleItem {
                id: "Medium-Group-2-Item4",
                title: "Tip 04",
                image: "Assets/HubPage/HubpageImage09.png",
                headline: "Help! Get My Ex-Girlfriend Back",
                span: MEDIUM,
            },
        ],
    },
    SampleGroup {
        id: "Group-3",
        title: "General",
        subtitle: "Group Subtitle: 2",
        items: &[
            SampleItem {
                id: "Big-Group-3-Item1",
                title: "Tip 01",
                image: "Assets/HubPage/HubpageImage10.png",
                headline: "Get Ex Back -- Even if They've Moved On",
                span: BIG,
            },
            SampleItem {
                id: "Landscape-Group-3-Item2",
                title: "Tip 02",
                image: "Assets/HubPage/HubpageImage11.png",
                headline: "Get My Ex Back -- Turn off the Noise and Get Some Good Advice",
                span: LANDSCAPE,
            },
            SampleItem {
                id: "Medium-Group-3-Item3",
                title: "Tip 03",
                image: "Assets/HubPage/HubpageImage12.png",
                headline: "Secrets of Getting an Ex Back Into Your Arms -- For Good This Time",
                span: MEDIUM,
            },
            SampleItem {
                id: "Medium-Group-3-Item4",
                title: "Tip 04",
                image: "Assets/HubPage/HubpageImage13.png",
                headline: "Getting Back Together -- How to Deal With Old Feelings",
                span: MEDIUM,
            },
        ],
    },
    SampleGroup {
        id: "Group-4",
        title: "Useful Tricks for all",
        subtitle: "Group Subtitle: 2",
        items: &[
            SampleItem {
                id: "Medium-Group-4-Item1",
                title: "Trick 01",
                image: "Assets/HubPage/HubpageImage14.png",
                headline: "Get Your Ex Back -- Two Things You Need to Do Now",
                span: MEDIUM,
            },
            SampleItem {
                id: "Medium-Group-4-Item2",
                title: "Trick 02",
                image: "Assets/HubPage/HubpageImage15.png",
                headline: "How to Get Over An Ex -- Or Not!",
                span: MEDIUM,
            },
            SampleItem {
                id: "Medium-Group-4-Item3",
                title: "Trick 03",
                image: "Assets/HubPage/HubpageImage16.png",
                headline: "Win Back Your Ex -- It's Possible With The Right Timing",
                span: MEDIUM,
            },
            SampleItem {
                id: "Medium-Group-4-Item4",
                title: "Trick 04",
                image: "Assets/HubPage/HubpageImage17.png",
                headline: "How to Get Back with Your Ex Girlfriend",
                span: MEDIUM,
            },
        ],
    },
];

/// Builds the placeholder catalog with the given per-group window config.
pub fn sample_data_source(config: GroupConfig) -> Result<DataSource, ValidationError> {
    let source = DataSource::new();
    for sample in SAMPLE_GROUPS {
        let group = Group::with_config(
            GroupFields {
                unique_id: sample.id.to_string(),
                title: sample.title.to_string(),
                subtitle: sample.subtitle.to_string(),
                image_path: Some(GROUP_IMAGE.to_string()),
                description: GROUP_DESCRIPTION.to_string(),
            },
            config,
        )?;
        for sample_item in sample.items {
            group.items().push(build_item(sample_item, &group)?);
        }
        source.add_group(group);
    }

    debug!(
        "event=sample_catalog_built module=source groups={} items={} capacity={}",
        source.all_groups().len(),
        source.item_count(),
        config.top_items_capacity
    );
    Ok(source)
}

fn build_item(sample: &SampleItem, group: &Group) -> Result<Item, ValidationError> {
    let (col_span, row_span) = sample.span;
    Item::new(
        ItemFields {
            unique_id: sample.id.to_string(),
            title: sample.title.to_string(),
            subtitle: sample.title.to_string(),
            image_path: Some(sample.image.to_string()),
            description: ITEM_DESCRIPTION.to_string(),
            content: sample_content(sample.headline),
            span: DisplaySpan::new(col_span, row_span)?,
        },
        group,
    )
}

fn sample_content(headline: &str) -> String {
    format!(
        "{headline}\n\nPlaceholder article text. Replace this content with the real \
         tip before publishing.\n\nKeep each tip short enough to read on one screen."
    )
}
