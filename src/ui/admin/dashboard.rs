// SPDX-License-Identifier: MPL-2.0
//! Admin dashboard: catalog stats, weekly visits and the collection list.

use super::ViewContext;
use crate::application::inquiry::group_thousands;
use crate::domain::analytics::{Visit, VisitStats};
use crate::domain::catalog::{CatalogStats, Collection, CollectionStatus};
use crate::domain::ids::CollectionId;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, container, scrollable, text, Column, Row};
use iced::{alignment, Element, Length};

#[derive(Debug, Clone)]
pub enum Message {
    Refresh,
    Add,
    Edit(CollectionId),
    AskDelete(CollectionId),
    ConfirmDelete,
    CancelDelete,
    ToggleStatus(CollectionId),
    OpenInvitations,
    OpenStorefront,
    /// Periodic refresh of the visit stats.
    RefreshVisits,
    ToggleVisitLog,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    None,
    /// Reload the catalog and the visit stats.
    Reload,
    LoadVisits,
    /// `None` opens an empty form.
    OpenEditor(Option<Collection>),
    Delete(CollectionId),
    SetStatus {
        id: CollectionId,
        status: CollectionStatus,
    },
    OpenInvitations,
    OpenStorefront,
}

/// Visit stats as last loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Visits {
    #[default]
    Loading,
    Loaded(VisitStats),
    Failed,
}

#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    collections: Vec<Collection>,
    pending_delete: Option<CollectionId>,
    visits: Visits,
    show_visit_log: bool,
}

impl Dashboard {
    #[must_use]
    pub fn new(collections: Vec<Collection>) -> Self {
        Self {
            collections,
            ..Self::default()
        }
    }

    /// Stores fresh stats, or keeps the previous ones when a refresh fails.
    pub fn set_visits(&mut self, stats: Option<VisitStats>) {
        match stats {
            Some(stats) => self.visits = Visits::Loaded(stats),
            None if matches!(self.visits, Visits::Loaded(_)) => {}
            None => self.visits = Visits::Failed,
        }
    }

    #[must_use]
    pub fn visits(&self) -> &Visits {
        &self.visits
    }

    #[must_use]
    pub fn shows_visit_log(&self) -> bool {
        self.show_visit_log
    }

    pub fn set_collections(&mut self, collections: Vec<Collection>) {
        if let Some(id) = self.pending_delete {
            if !collections.iter().any(|c| c.id == id) {
                self.pending_delete = None;
            }
        }
        self.collections = collections;
    }

    #[must_use]
    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    #[must_use]
    pub fn stats(&self) -> CatalogStats {
        CatalogStats::of(&self.collections)
    }

    #[must_use]
    pub fn pending_delete(&self) -> Option<CollectionId> {
        self.pending_delete
    }

    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::Refresh => Event::Reload,
            Message::Add => Event::OpenEditor(None),
            Message::Edit(id) => Event::OpenEditor(self.find(id).cloned()),
            Message::AskDelete(id) => {
                if self.find(id).is_some() {
                    self.pending_delete = Some(id);
                }
                Event::None
            }
            Message::ConfirmDelete => match self.pending_delete.take() {
                Some(id) => Event::Delete(id),
                None => Event::None,
            },
            Message::CancelDelete => {
                self.pending_delete = None;
                Event::None
            }
            Message::ToggleStatus(id) => match self.find(id) {
                Some(collection) => Event::SetStatus {
                    id,
                    status: collection.status.toggled(),
                },
                None => Event::None,
            },
            Message::OpenInvitations => Event::OpenInvitations,
            Message::OpenStorefront => Event::OpenStorefront,
            Message::RefreshVisits => Event::LoadVisits,
            Message::ToggleVisitLog => {
                self.show_visit_log = !self.show_visit_log;
                Event::None
            }
        }
    }

    fn find(&self, id: CollectionId) -> Option<&Collection> {
        self.collections.iter().find(|c| c.id == id)
    }
}

pub fn view<'a>(dashboard: &'a Dashboard, ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let header = Row::new()
        .spacing(spacing::XS)
        .align_y(alignment::Vertical::Center)
        .push(
            Column::new()
                .push(text(ctx.i18n.tr("admin-dashboard-title")).size(typography::TITLE_LG))
                .push(
                    text(ctx.admin.email())
                        .size(typography::CAPTION)
                        .color(palette::GRAY_400),
                )
                .width(Length::Fill),
        )
        .push(nav_button(ctx, "admin-view-storefront", Message::OpenStorefront))
        .push(nav_button(ctx, "admin-invitations", Message::OpenInvitations))
        .push(
            button(text(ctx.i18n.tr("admin-add-collection")).size(typography::BODY))
                .padding([spacing::XS, spacing::MD])
                .style(styles::button::primary)
                .on_press(Message::Add),
        );

    let stats = dashboard.stats();
    let stats_row = Row::new()
        .spacing(spacing::MD)
        .push(stat_card(ctx, "admin-stat-total", stats.total, palette::PRIMARY_500))
        .push(stat_card(ctx, "admin-stat-available", stats.available, palette::SUCCESS_500))
        .push(stat_card(ctx, "admin-stat-sold-out", stats.sold_out, palette::ERROR_500));

    let list: Element<'a, Message> = if dashboard.collections.is_empty() {
        container(
            text(ctx.i18n.tr("admin-no-collections"))
                .size(typography::BODY)
                .color(palette::GRAY_400),
        )
        .width(Length::Fill)
        .padding(spacing::XL)
        .align_x(alignment::Horizontal::Center)
        .into()
    } else {
        scrollable(
            Column::with_children(
                dashboard
                    .collections
                    .iter()
                    .map(|collection| row(dashboard, collection, ctx)),
            )
            .spacing(spacing::XS),
        )
        .height(Length::Fill)
        .into()
    };

    container(
        Column::new()
            .spacing(spacing::LG)
            .push(header)
            .push(stats_row)
            .push(visits_section(dashboard, ctx))
            .push(list),
    )
    .padding(spacing::LG)
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}

fn visits_section<'a>(dashboard: &'a Dashboard, ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let toggle_key = if dashboard.show_visit_log {
        "admin-visits-hide-log"
    } else {
        "admin-visits-show-log"
    };
    let header = Row::new()
        .spacing(spacing::XS)
        .align_y(alignment::Vertical::Center)
        .push(
            text(ctx.i18n.tr("admin-visits-title"))
                .size(typography::TITLE_SM)
                .width(Length::Fill),
        )
        .push(nav_button(ctx, toggle_key, Message::ToggleVisitLog));

    let stats = match &dashboard.visits {
        Visits::Loading => Row::new().push(
            text(ctx.i18n.tr("admin-visits-loading"))
                .size(typography::BODY_SM)
                .color(palette::GRAY_400),
        ),
        Visits::Failed => Row::new().push(
            text(ctx.i18n.tr("error-analytics-unavailable"))
                .size(typography::BODY_SM)
                .color(palette::ERROR_500),
        ),
        Visits::Loaded(stats) => Row::new()
            .spacing(spacing::MD)
            .push(stat_card(ctx, "admin-visits-weekly", stats.weekly_visits, palette::PRIMARY_500))
            .push(stat_card(ctx, "admin-visits-unique", stats.weekly_unique, palette::PRIMARY_500)),
    };

    let mut section = Column::new().spacing(spacing::SM).push(header).push(stats);
    if dashboard.show_visit_log {
        section = section.push(visit_log(dashboard, ctx));
    }
    section.into()
}

fn visit_log<'a>(dashboard: &'a Dashboard, ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let recent: &[Visit] = match &dashboard.visits {
        Visits::Loaded(stats) => &stats.recent,
        Visits::Loading | Visits::Failed => &[],
    };
    if recent.is_empty() {
        return text(ctx.i18n.tr("admin-visits-empty"))
            .size(typography::BODY_SM)
            .color(palette::GRAY_400)
            .into();
    }
    let rows = recent.iter().map(|visit| {
        let visited_at = visit
            .visited_at
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M")
            .to_string();
        container(
            Row::new()
                .spacing(spacing::MD)
                .push(text(visit.page_path.as_str()).size(typography::BODY_SM))
                .push(
                    text(visit.browser())
                        .size(typography::BODY_SM)
                        .color(palette::GRAY_400)
                        .width(Length::Fill),
                )
                .push(
                    text(visited_at)
                        .size(typography::BODY_SM)
                        .color(palette::GRAY_400),
                ),
        )
        .padding([spacing::XXS, spacing::XS])
        .width(Length::Fill)
        .into()
    });
    container(scrollable(Column::with_children(rows).spacing(spacing::XXS)))
        .padding(spacing::XS)
        .width(Length::Fill)
        .max_height(sizing::VISIT_LOG_HEIGHT)
        .style(styles::container::card)
        .into()
}

fn nav_button<'a>(ctx: &ViewContext<'a>, key: &str, message: Message) -> Element<'a, Message> {
    button(text(ctx.i18n.tr(key)).size(typography::BODY))
        .padding([spacing::XS, spacing::MD])
        .style(styles::button::secondary)
        .on_press(message)
        .into()
}

fn stat_card<'a>(
    ctx: &ViewContext<'a>,
    key: &str,
    value: usize,
    accent: iced::Color,
) -> Element<'a, Message> {
    container(
        Column::new()
            .spacing(spacing::XXS)
            .push(
                text(ctx.i18n.tr(key))
                    .size(typography::CAPTION)
                    .color(palette::GRAY_400),
            )
            .push(text(value.to_string()).size(typography::TITLE_LG).color(accent)),
    )
    .padding(spacing::MD)
    .width(Length::Fill)
    .style(styles::container::card)
    .into()
}

fn row<'a>(
    dashboard: &'a Dashboard,
    collection: &'a Collection,
    ctx: &ViewContext<'a>,
) -> Element<'a, Message> {
    let id = collection.id;
    let status_color = if collection.status.is_sold_out() {
        palette::ERROR_500
    } else {
        palette::SUCCESS_500
    };

    let images = collection.images.len().to_string();
    let videos = collection.videos.len().to_string();
    let media_count = ctx.i18n.tr_with_args(
        "admin-media-count",
        &[("images", images.as_str()), ("videos", videos.as_str())],
    );

    let summary = Column::new()
        .spacing(spacing::XXS)
        .push(text(collection.name.as_str()).size(typography::BODY_LG))
        .push(
            text(format!(
                "{}{} · {}",
                ctx.currency_symbol,
                group_thousands(collection.price),
                media_count,
            ))
            .size(typography::CAPTION)
            .color(palette::GRAY_400),
        )
        .width(Length::Fill);

    let status = container(text(ctx.i18n.tr(collection.status.i18n_key())).size(typography::CAPTION))
        .padding([spacing::XXS, spacing::XS])
        .style(styles::container::badge(status_color));

    let toggle_key = if collection.status.is_sold_out() {
        "admin-mark-available"
    } else {
        "admin-mark-sold-out"
    };

    let actions: Element<'a, Message> = if dashboard.pending_delete == Some(id) {
        Row::new()
            .spacing(spacing::XS)
            .align_y(alignment::Vertical::Center)
            .push(
                text(ctx.i18n.tr("admin-delete-confirm"))
                    .size(typography::BODY_SM)
                    .color(palette::ERROR_500),
            )
            .push(
                button(text(ctx.i18n.tr("admin-delete")).size(typography::BODY_SM))
                    .style(styles::button::danger)
                    .on_press(Message::ConfirmDelete),
            )
            .push(
                button(text(ctx.i18n.tr("admin-cancel")).size(typography::BODY_SM))
                    .style(styles::button::secondary)
                    .on_press(Message::CancelDelete),
            )
            .into()
    } else {
        Row::new()
            .spacing(spacing::XS)
            .push(
                button(text(ctx.i18n.tr(toggle_key)).size(typography::BODY_SM))
                    .style(styles::button::secondary)
                    .on_press(Message::ToggleStatus(id)),
            )
            .push(
                button(text(ctx.i18n.tr("admin-edit")).size(typography::BODY_SM))
                    .style(styles::button::secondary)
                    .on_press(Message::Edit(id)),
            )
            .push(
                button(text(ctx.i18n.tr("admin-delete")).size(typography::BODY_SM))
                    .style(styles::button::danger)
                    .on_press(Message::AskDelete(id)),
            )
            .into()
    };

    container(
        Row::new()
            .spacing(spacing::MD)
            .align_y(alignment::Vertical::Center)
            .push(summary)
            .push(status)
            .push(actions),
    )
    .padding(spacing::SM)
    .width(Length::Fill)
    .style(styles::container::card)
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::CollectionDraft;
    use chrono::Utc;

    fn collection(name: &str, status: CollectionStatus) -> Collection {
        let draft = CollectionDraft {
            name: name.into(),
            price: 4_999,
            description: "Silk".into(),
            images: vec!["a.jpg".into()],
            videos: Vec::new(),
            status,
            category: None,
        };
        Collection::from_draft(draft.validate().expect("valid"), Utc::now())
    }

    #[test]
    fn delete_requires_confirmation() {
        let first = collection("A", CollectionStatus::Available);
        let id = first.id;
        let mut dashboard = Dashboard::new(vec![first]);

        assert_eq!(dashboard.update(Message::AskDelete(id)), Event::None);
        assert_eq!(dashboard.pending_delete(), Some(id));
        assert_eq!(dashboard.update(Message::ConfirmDelete), Event::Delete(id));
        assert_eq!(dashboard.update(Message::ConfirmDelete), Event::None);

        dashboard.update(Message::AskDelete(id));
        dashboard.update(Message::CancelDelete);
        assert_eq!(dashboard.pending_delete(), None);
    }

    #[test]
    fn toggle_requests_opposite_status() {
        let sold = collection("B", CollectionStatus::SoldOut);
        let id = sold.id;
        let mut dashboard = Dashboard::new(vec![sold]);
        assert_eq!(
            dashboard.update(Message::ToggleStatus(id)),
            Event::SetStatus {
                id,
                status: CollectionStatus::Available
            }
        );
    }

    #[test]
    fn stats_follow_collections() {
        let dashboard = Dashboard::new(vec![
            collection("A", CollectionStatus::Available),
            collection("B", CollectionStatus::SoldOut),
            collection("C", CollectionStatus::Available),
        ]);
        let stats = dashboard.stats();
        assert_eq!((stats.total, stats.available, stats.sold_out), (3, 2, 1));
    }

    #[test]
    fn visit_log_toggles_and_refresh_requests_stats() {
        let mut dashboard = Dashboard::default();
        assert!(!dashboard.shows_visit_log());
        assert_eq!(dashboard.update(Message::ToggleVisitLog), Event::None);
        assert!(dashboard.shows_visit_log());
        dashboard.update(Message::ToggleVisitLog);
        assert!(!dashboard.shows_visit_log());
        assert_eq!(dashboard.update(Message::RefreshVisits), Event::LoadVisits);
    }

    #[test]
    fn failed_refresh_keeps_loaded_visits() {
        let mut dashboard = Dashboard::default();
        assert_eq!(dashboard.visits(), &Visits::Loading);
        dashboard.set_visits(None);
        assert_eq!(dashboard.visits(), &Visits::Failed);

        let stats = VisitStats {
            weekly_visits: 4,
            weekly_unique: 2,
            recent: Vec::new(),
        };
        dashboard.set_visits(Some(stats.clone()));
        dashboard.set_visits(None);
        assert_eq!(dashboard.visits(), &Visits::Loaded(stats));
    }

    #[test]
    fn reload_drops_stale_pending_delete() {
        let first = collection("A", CollectionStatus::Available);
        let id = first.id;
        let mut dashboard = Dashboard::new(vec![first]);
        dashboard.update(Message::AskDelete(id));
        dashboard.set_collections(Vec::new());
        assert_eq!(dashboard.pending_delete(), None);
    }
}
