//! Renders a preview result of any shape.
//!
//! Top-level keys become section tabs. Each value is laid out according to
//! [`SectionView`]: objects as field/value tables, arrays of objects as
//! tables with one column per key, other arrays as indented lists. Nested
//! objects and arrays inside a field are rendered recursively.

use std::rc::Rc;

use common::export::ExportFormat;
use common::model::parsed::ParsedData;
use common::model::preview::{cell_text, humanize_key, PreviewData, SectionView};
use serde_json::Value;
use yew::prelude::*;

use crate::helpers::{download_bytes, show_toast};

pub enum Msg {
    SelectSection(usize),
    Export(ExportFormat),
}

#[derive(Properties, PartialEq)]
pub struct JsonPreviewProps {
    pub preview: PreviewData,
    /// Source of the exported form data.
    pub data: Rc<ParsedData>,
    pub on_clear: Callback<()>,
    pub on_error: Callback<String>,
}

pub struct JsonPreview {
    active_section: usize,
}

impl Component for JsonPreview {
    type Message = Msg;
    type Properties = JsonPreviewProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self { active_section: 0 }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().preview != old_props.preview {
            self.active_section = 0;
        }
        true
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SelectSection(index) => {
                self.active_section = index;
                true
            }
            Msg::Export(format) => {
                let result = format
                    .encode(&ctx.props().data)
                    .map_err(|err| err.to_string())
                    .and_then(|bytes| {
                        download_bytes(&bytes, format.file_name(), format.mime_type())
                            .map_err(|err| format!("Download failed: {err:?}"))
                    });
                match result {
                    Ok(()) => show_toast(&format!("Exported {}", format.file_name())),
                    Err(message) => {
                        log::error!("export to {} failed: {message}", format.file_name());
                        ctx.props().on_error.emit(message);
                    }
                }
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let props = ctx.props();
        let sections = props.preview.sections();
        let active = self.active_section.min(sections.len().saturating_sub(1));
        let on_clear = props.on_clear.clone();

        html! {
            <div class="json-preview card">
                <div class="preview-header">
                    <h3>{ "Data Preview" }</h3>
                    <div class="preview-actions">
                        <button class="btn" onclick={Callback::from(move |_| on_clear.emit(()))}>
                            { "Clear Preview" }
                        </button>
                        <button class="btn primary" onclick={link.callback(|_| Msg::Export(ExportFormat::Csv))}>
                            { "Export as CSV" }
                        </button>
                        <button class="btn primary" onclick={link.callback(|_| Msg::Export(ExportFormat::Xlsx))}>
                            { "Export as Excel" }
                        </button>
                    </div>
                </div>

                <div class="tab-bar sections">
                    { for sections.iter().enumerate().map(|(index, section)| html! {
                        <button
                            class={classes!("tab-btn", (index == active).then_some("active"))}
                            onclick={link.callback(move |_| Msg::SelectSection(index))}
                        >
                            { section.title.clone() }
                        </button>
                    }) }
                </div>

                if let Some(section) = sections.get(active) {
                    <div class="section-body">{ render_value(section.value) }</div>
                }
            </div>
        }
    }
}

fn render_value(value: &Value) -> Html {
    match SectionView::of(value) {
        SectionView::Primitive(text) => html! { <span>{ text }</span> },
        SectionView::Empty => html! { <p class="muted">{ "Empty array" }</p> },
        SectionView::KeyValue(fields) => html! {
            <div class="table-scroll">
                <table class="preview-table">
                    <thead>
                        <tr><th>{ "Field" }</th><th>{ "Value" }</th></tr>
                    </thead>
                    <tbody>
                        { for fields.into_iter().map(|(key, value)| html! {
                            <tr>
                                <th scope="row">{ key.to_string() }</th>
                                <td>{ render_field(value) }</td>
                            </tr>
                        }) }
                    </tbody>
                </table>
            </div>
        },
        SectionView::Table { headers, rows } => html! {
            <div class="table-scroll">
                <table class="preview-table striped">
                    <thead>
                        <tr>
                            { for headers.iter().map(|header| html! { <th>{ humanize_key(header) }</th> }) }
                        </tr>
                    </thead>
                    <tbody>
                        { for rows.iter().map(|row| html! {
                            <tr>
                                { for headers.iter().map(|header| html! {
                                    <td>{ cell_text(row.get(*header)) }</td>
                                }) }
                            </tr>
                        }) }
                    </tbody>
                </table>
            </div>
        },
        SectionView::List(items) => html! {
            <div class="value-list">
                { for items.iter().map(|item| html! { <div class="value-list-item">{ render_field(item) }</div> }) }
            </div>
        },
    }
}

// Scalars print inline; structures nest in a scroll box.
fn render_field(value: &Value) -> Html {
    if value.is_object() || value.is_array() {
        html! { <div class="nested-value">{ render_value(value) }</div> }
    } else {
        html! { { cell_text(Some(value)) } }
    }
}
