use shellkit::component;

component!(TicketList, "tickets/list");
component!(SlaBoard, "tickets/sla");
component!(TicketDetail, "tickets/detail");
component!(AssignDialog, "tickets/assign");
component!(CloseDialog, "tickets/close");
component!(CreateTicketDialog, "tickets/create");
