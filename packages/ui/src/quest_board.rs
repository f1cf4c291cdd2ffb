//! Mailbox-style quest listing: navigation menu, paginated table, star toggle.

use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_regular_icons::FaStar as FaRegStar;
use dioxus_free_icons::icons::fa_solid_icons::FaStar;
use dioxus_free_icons::Icon;
use domain::listing::{menu, BadgeTone};
use domain::{
    propagate_importance, MailFilter, MailId, MenuEntry, MenuItem, QuestBackend, QuestBoard,
    QuestRecord, TimeColumn,
};

use crate::provider::use_app;
use crate::StatusTag;

/// The quest board page body.
///
/// Records are fetched once on mount and the listing always opens on "all".
/// `on_filter_change` fires after every menu selection so the host can mirror the
/// filter into the URL; `on_open` fires for a row click outside the star cell.
#[component]
pub fn QuestBoardView(
    on_open: EventHandler<MailId>,
    on_filter_change: EventHandler<MailFilter>,
) -> Element {
    let app = use_app();
    let listing = app.config.listing.clone();
    let backend = use_signal(|| app.backend.clone());
    let mut board = use_signal(|| QuestBoard::new(listing.page_size, listing.time_column));

    let _loader = use_resource(move || async move {
        let Some(backend) = backend.read().clone() else {
            tracing::error!("Error fetching data: no quest API configured");
            return;
        };
        match backend.fetch_mails().await {
            Ok(records) => {
                tracing::info!("Loaded {} quests", records.len());
                board.write().load(records);
            }
            Err(e) => tracing::error!("Error fetching data: {}", e),
        }
    });

    let mut select = move |filter: MailFilter| {
        board.write().select(filter.clone());
        on_filter_change.call(filter);
    };

    let mut toggle = move |id: MailId| {
        let Some(flag) = board.write().toggle_important(&id) else {
            tracing::warn!(%id, "star toggled on unknown quest");
            return;
        };
        let Some(backend) = backend.read().clone() else {
            tracing::error!(%id, "Error updating important status: no quest API configured");
            return;
        };
        spawn(async move {
            propagate_importance(&backend, &id, flag).await;
        });
    };

    let (items, current, time_column, rows, page, page_count) = {
        let state = board.read();
        (
            menu(state.counts()),
            state.filter().clone(),
            state.time_column(),
            state
                .page_rows()
                .into_iter()
                .cloned()
                .collect::<Vec<QuestRecord>>(),
            state.page(),
            state.page_count(),
        )
    };

    let title = menu_title(&items, &current);

    rsx! {
        div {
            class: "quest-board",

            nav {
                class: "quest-menu",
                for (index, item) in items.into_iter().enumerate() {
                    {match item {
                        MenuItem::Group { entry, children } => rsx! {
                            div {
                                key: "{index}",
                                class: "quest-menu-group",
                                MenuButton {
                                    entry: entry,
                                    current: current.clone(),
                                    on_select: move |f: MailFilter| select(f),
                                }
                                div {
                                    class: "quest-menu-children",
                                    for (child_index, child) in children.into_iter().enumerate() {
                                        MenuButton {
                                            key: "{child_index}",
                                            entry: child,
                                            current: current.clone(),
                                            on_select: move |f: MailFilter| select(f),
                                        }
                                    }
                                }
                            }
                        },
                        MenuItem::Entry(entry) => rsx! {
                            MenuButton {
                                key: "{index}",
                                entry: entry,
                                current: current.clone(),
                                on_select: move |f: MailFilter| select(f),
                            }
                        },
                        MenuItem::Label(label) => rsx! {
                            div { key: "{index}", class: "quest-menu-label", "{label}" }
                        },
                        MenuItem::Divider => rsx! {
                            hr { key: "{index}", class: "quest-menu-divider" }
                        },
                    }}
                }
            }

            section {
                class: "quest-main",
                h2 { class: "quest-title", "{title}" }

                table {
                    class: "quest-table",
                    thead {
                        tr {
                            th { class: "col-star" }
                            th { class: "col-status", "상태" }
                            th { class: "col-category", "분야" }
                            th { "세부 분야" }
                            th { class: "col-title", "제목" }
                            th {
                                select {
                                    class: "time-select",
                                    value: "{time_column.key()}",
                                    onchange: move |evt: FormEvent| {
                                        if let Some(column) = TimeColumn::from_key(&evt.value()) {
                                            board.write().set_time_column(column);
                                        }
                                    },
                                    for column in TimeColumn::ALL {
                                        option {
                                            key: "{column.key()}",
                                            value: "{column.key()}",
                                            selected: column == time_column,
                                            "{column.label()}"
                                        }
                                    }
                                }
                            }
                        }
                    }
                    tbody {
                        if rows.is_empty() {
                            tr {
                                td { class: "quest-table-empty", colspan: "6", "데이터 없음" }
                            }
                        }
                        for record in rows {
                            tr {
                                key: "{record.id}",
                                class: "quest-row",
                                onclick: {
                                    let id = record.id.clone();
                                    move |_| on_open.call(id.clone())
                                },
                                td {
                                    class: "col-star",
                                    onclick: {
                                        let id = record.id.clone();
                                        move |evt: MouseEvent| {
                                            evt.stop_propagation();
                                            toggle(id.clone());
                                        }
                                    },
                                    if record.is_important {
                                        span {
                                            class: "star star--on",
                                            Icon { icon: FaStar, width: 18, height: 18 }
                                        }
                                    } else {
                                        span {
                                            class: "star",
                                            Icon { icon: FaRegStar, width: 18, height: 18 }
                                        }
                                    }
                                }
                                td { StatusTag { status: record.status.clone() } }
                                td { "{record.category}" }
                                td { "{record.subcategory}" }
                                td { "{record.title}" }
                                td { "{time_column.value(&record)}" }
                            }
                        }
                    }
                }

                Pagination {
                    page: page,
                    page_count: page_count,
                    on_change: move |p: usize| board.write().set_page(p),
                }
            }
        }
    }
}

/// Label of the menu entry for `current`.
fn menu_title(items: &[MenuItem], current: &MailFilter) -> &'static str {
    items
        .iter()
        .flat_map(|item| match item {
            MenuItem::Group { entry, children } => std::iter::once(entry).chain(children).collect::<Vec<_>>(),
            MenuItem::Entry(entry) => vec![entry],
            MenuItem::Label(_) | MenuItem::Divider => Vec::new(),
        })
        .find(|entry| &entry.filter == current)
        .map_or("전체 의뢰함", |entry| entry.label)
}

fn badge_class(tone: BadgeTone) -> &'static str {
    match tone {
        BadgeTone::Red => "badge badge--red",
        BadgeTone::Blue => "badge badge--blue",
        BadgeTone::Green => "badge badge--green",
        BadgeTone::Grey => "badge badge--grey",
    }
}

#[component]
fn MenuButton(entry: MenuEntry, current: MailFilter, on_select: EventHandler<MailFilter>) -> Element {
    let active = entry.filter == current;
    let filter = entry.filter.clone();
    rsx! {
        button {
            r#type: "button",
            class: if active { "quest-menu-item active" } else { "quest-menu-item" },
            onclick: move |_| on_select.call(filter.clone()),
            span { "{entry.label}" }
            span { class: badge_class(entry.tone), "{entry.count}" }
        }
    }
}

/// Page links centred under the table.
#[component]
fn Pagination(page: usize, page_count: usize, on_change: EventHandler<usize>) -> Element {
    rsx! {
        div {
            class: "pagination",
            button {
                r#type: "button",
                class: "pagination-step",
                disabled: page <= 1,
                onclick: move |_| on_change.call(page.saturating_sub(1)),
                "‹"
            }
            for n in 1..=page_count {
                button {
                    key: "{n}",
                    r#type: "button",
                    class: if n == page { "pagination-page active" } else { "pagination-page" },
                    onclick: move |_| on_change.call(n),
                    "{n}"
                }
            }
            button {
                r#type: "button",
                class: "pagination-step",
                disabled: page >= page_count,
                onclick: move |_| on_change.call(page + 1),
                "›"
            }
        }
    }
}
