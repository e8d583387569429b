//! Components contributed by the core module.

use shellkit::component;

component!(TableView, "core/table");
component!(CalendarView, "core/calendar");
component!(KanbanView, "core/kanban");
component!(RefreshAction, "core/refresh");
component!(ActivityFeed, "core/activity");
