use shellkit::component;

component!(ScheduleCalendar, "workforce/schedule");
component!(ClockInDialog, "workforce/clock-in");
component!(TimelineView, "workforce/timeline");
component!(EmployeeDetail, "workforce/employee");
component!(TicketWorkload, "workforce/workload");
